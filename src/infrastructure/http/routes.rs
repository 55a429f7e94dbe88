//! HTTP Routes
//!
//! 路径沿用原前端页面的调用约定：
//! - /check-db-connection, /init-db                数据库管理
//! - /owner, /create_user, /search_user_*, ...     业主与用户
//! - /add_to_follows, /view_follows, ...           关注关系
//! - /verify_users, /verify_user, /get_verified_users  用户认证
//! - /tables, /attributes, /project                动态投影
//! - /restaurant, /menu-items, /edit-menu-items    餐厅与菜品
//! - /menu-item-reviews, /restaurant-review        评论
//! - /cheapest-menu-items-by-type, ...             报表

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(admin_routes())
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(restaurant_routes())
        .merge(review_routes())
}

/// 数据库管理
fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check-db-connection", get(handlers::check_db_connection))
        .route("/init-db", post(handlers::init_db))
}

/// 业主、用户、关注、认证
fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/owner",
            get(handlers::list_owners)
                .post(handlers::create_owner)
                .delete(handlers::delete_owner),
        )
        .route("/create_user", post(handlers::create_user))
        .route("/search_user_by_id", post(handlers::search_user_by_id))
        .route("/search_user_by_name", post(handlers::search_user_by_name))
        .route("/search_user_by_city", post(handlers::search_user_by_city))
        .route("/update_user", post(handlers::update_user))
        .route("/delete_user", delete(handlers::delete_user))
        .route("/cities", get(handlers::list_cities))
        .route("/add_to_follows", post(handlers::add_to_follows))
        .route("/view_follows", post(handlers::view_follows))
        .route(
            "/delete_follows_pair",
            delete(handlers::delete_follows_pair),
        )
        .route("/verify_users", get(handlers::verify_users))
        .route("/verify_user", post(handlers::verify_user))
        .route("/get_verified_users", get(handlers::get_verified_users))
}

/// 表与列的动态投影
fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(handlers::list_tables))
        .route("/attributes", post(handlers::list_attributes))
        .route("/project", post(handlers::project))
}

/// 餐厅、菜品与报表
fn restaurant_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/restaurant",
            get(handlers::list_restaurants)
                .post(handlers::create_restaurant)
                .put(handlers::update_restaurant)
                .delete(handlers::delete_restaurant),
        )
        .route(
            "/menu-items",
            get(handlers::list_menu_items)
                .post(handlers::create_menu_item)
                .delete(handlers::delete_menu_item),
        )
        .route("/edit-menu-items", post(handlers::edit_menu_item))
        .route("/menu-item-types", get(handlers::list_menu_item_types))
        .route(
            "/cheapest-menu-items-by-type",
            get(handlers::cheapest_menu_items_by_type),
        )
        .route(
            "/most-expensive-menu-items-by-type",
            get(handlers::most_expensive_menu_items_by_type),
        )
        .route(
            "/restaurants-with-all-menu-item-types",
            get(handlers::restaurants_with_all_menu_item_types),
        )
}

/// 菜品评论与餐厅评论
fn review_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/menu-item-reviews",
            get(handlers::list_menu_item_reviews)
                .post(handlers::create_menu_item_review)
                .delete(handlers::delete_menu_item_review),
        )
        .route(
            "/restaurant-review",
            get(handlers::view_restaurant_reviews)
                .post(handlers::create_restaurant_review)
                .put(handlers::update_restaurant_review)
                .delete(handlers::delete_restaurant_review),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::VerificationSettings;
    use crate::infrastructure::persistence::sqlite::seeded_test_pool;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn app() -> Router {
        let state = AppState::from_pool(seeded_test_pool().await, VerificationSettings::default());
        create_routes().with_state(Arc::new(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_check_db_connection_is_plaintext() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/check-db-connection", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"connected");
    }

    #[tokio::test]
    async fn test_add_to_follows_then_repeat() {
        let app = app().await;
        let pair = json!({ "UserId1": "user2", "UserId2": "user1" });

        let (status, body) = send_json(&app, Method::POST, "/add_to_follows", Some(pair.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], json!(1));

        let (status, body) = send_json(&app, Method::POST, "/add_to_follows", Some(pair)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], json!(0));
    }

    #[tokio::test]
    async fn test_add_to_follows_missing_followee() {
        let app = app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/add_to_follows",
            Some(json!({ "UserId1": "user1", "UserId2": "ghost" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], json!(-2));
    }

    #[tokio::test]
    async fn test_cheapest_menu_items_by_type() {
        let app = app().await;
        let (status, body) = send_json(&app, Method::GET, "/cheapest-menu-items-by-type", None).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body["data"].as_array().unwrap();
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r["Type"].as_str().unwrap(), r["Name"].as_str().unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Burgers", "Cheeseburger"),
                ("Dim Sum", "Shrimp wrappers"),
                ("Pasta", "Lasagna"),
                ("Pizza", "Pepperoni Pizza"),
                ("Sushi", "California Roll"),
            ]
        );
    }

    #[tokio::test]
    async fn test_restaurants_with_all_types_query_string() {
        let app = app().await;
        let (status, body) = send_json(
            &app,
            Method::GET,
            "/restaurants-with-all-menu-item-types?types=Burgers,Pasta",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["BusinessNumber"], json!(234));
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_restaurant_at_taken_address() {
        let app = app().await;
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/restaurant",
            Some(json!({
                "businessNumber": "777",
                "houseNumber": "6363",
                "streetName": "Agronomy Road",
                "postalCode": "V6T 1Z4",
                "cityName": "Vancouver",
                "name": "Late Night Noodles",
                "ownerId": 123456789
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["data"], json!(-3));
        assert_eq!(body["message"], json!("There is already a restaurant with the same address!"));

        let (_, listing) = send_json(&app, Method::GET, "/restaurant", None).await;
        assert_eq!(listing["data"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_owner_twice_conflicts() {
        let app = app().await;
        let owner = json!({ "sin": 111222333, "name": "Ada" });

        let (status, body) = send_json(&app, Method::POST, "/owner", Some(owner.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, body) = send_json(&app, Method::POST, "/owner", Some(owner)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app().await;
        let (status, body) = send_json(
            &app,
            Method::DELETE,
            "/menu-item-reviews",
            Some(json!({ "reviewNumber": "abc" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_restaurant_review_listing_for_restaurant() {
        let app = app().await;
        let (status, body) = send_json(
            &app,
            Method::GET,
            "/restaurant-review?type=restaurant&value=234",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 2);
    }
}
