//! Data Transfer Objects
//!
//! 请求字段名沿用前端表单的命名；数字字段同时接受 JSON 数字和数字字符串

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 未生效的操作（已关注、已存在等），附带结果码
    pub fn rejected(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }
}

// ============================================================================
// 宽松的字段解析
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
}

fn parse_text<T, E>(text: &str) -> Result<Option<T>, E>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    E: de::Error,
{
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<T>()
        .map(Some)
        .map_err(|e| E::custom(format!("invalid number '{}': {}", text, e)))
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<Lenient<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Value(value)) => Ok(Some(value)),
        Some(Lenient::Text(text)) => parse_text(&text),
    }
}

/// 必填整数：数字或数字字符串
pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_opt(deserializer)?.ok_or_else(|| de::Error::custom("expected a number"))
}

/// 可选整数：null、空字符串或缺省都视为未提供
pub fn lenient_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    lenient_opt(deserializer)
}

/// 必填小数：数字或数字字符串
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    lenient_opt(deserializer)?.ok_or_else(|| de::Error::custom("expected a number"))
}

/// 空白字符串视为未提供
pub fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

// ============================================================================
// Owner DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub sin: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOwnerRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub sin: i64,
}

// ============================================================================
// User DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub userid: String,
    pub name: String,
    pub city: String,
    pub province: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchUserByIdRequest {
    #[serde(rename = "UserId", default)]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchUserByNameRequest {
    #[serde(rename = "UserName", default)]
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchUserByCityRequest {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Province")]
    pub province: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "newName", default, deserialize_with = "blank_as_none")]
    pub new_name: Option<String>,
    #[serde(rename = "newCity", default, deserialize_with = "blank_as_none")]
    pub new_city: Option<String>,
    #[serde(rename = "newProvince", default, deserialize_with = "blank_as_none")]
    pub new_province: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdRequest {
    #[serde(rename = "UserId")]
    pub user_id: String,
}

// ============================================================================
// Follows DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FollowPairRequest {
    #[serde(rename = "UserId1")]
    pub user_id1: String,
    #[serde(rename = "UserId2")]
    pub user_id2: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewFollowsRequest {
    #[serde(rename = "UserId1", default, deserialize_with = "blank_as_none")]
    pub user_id1: Option<String>,
    #[serde(rename = "UserId2", default, deserialize_with = "blank_as_none")]
    pub user_id2: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub clause: Option<String>,
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRequest {
    pub table_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub table_name: String,
    #[serde(default)]
    pub query_attributes: Vec<String>,
}

// ============================================================================
// Menu Item DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMenuItemRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMenuItemRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub new_cost: f64,
}

/// `?types=Pizza,Pasta`
#[derive(Debug, Default, Deserialize)]
pub struct MenuItemTypesParams {
    #[serde(default)]
    pub types: Option<String>,
}

impl MenuItemTypesParams {
    pub fn into_types(self) -> Vec<String> {
        self.types
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// ============================================================================
// Restaurant DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub house_number: i64,
    pub street_name: String,
    pub postal_code: String,
    pub city_name: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub owner_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub house_number: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub street_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub city_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub owner_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessNumberRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
}

// ============================================================================
// Review DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemReviewRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub review_number: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    pub menu_item_name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub presentation_rating: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub taste_rating: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub portion_size_rating: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantReviewRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub review_number: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub business_number: i64,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub ambience_rating: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub cleanliness_rating: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub service_rating: i64,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantReviewRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub review_number: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub ambience_rating: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub cleanliness_rating: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub service_rating: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNumberRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub review_number: i64,
}

/// `?type=user&value=user1`
#[derive(Debug, Default, Deserialize)]
pub struct ReviewFilterParams {
    #[serde(rename = "type", default)]
    pub filter_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_accept_strings() {
        let request: CreateMenuItemRequest = serde_json::from_value(json!({
            "businessNumber": "123",
            "name": "Calzone",
            "type": "Pizza",
            "cost": " 9.5 "
        }))
        .unwrap();
        assert_eq!(request.business_number, 123);
        assert_eq!(request.cost, 9.5);

        let request: CreateMenuItemRequest = serde_json::from_value(json!({
            "businessNumber": 123,
            "name": "Calzone",
            "type": "Pizza",
            "cost": 9
        }))
        .unwrap();
        assert_eq!(request.cost, 9.0);
    }

    #[test]
    fn test_required_number_rejects_garbage() {
        let result: Result<BusinessNumberRequest, _> =
            serde_json::from_value(json!({ "businessNumber": "abc" }));
        assert!(result.is_err());

        let result: Result<BusinessNumberRequest, _> =
            serde_json::from_value(json!({ "businessNumber": "" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_fields_treat_blank_as_missing() {
        let request: UpdateRestaurantRequest = serde_json::from_value(json!({
            "businessNumber": 234,
            "houseNumber": "",
            "streetName": "  ",
            "name": "The Point",
            "ownerId": null
        }))
        .unwrap();
        assert_eq!(request.house_number, None);
        assert_eq!(request.street_name, None);
        assert_eq!(request.postal_code, None);
        assert_eq!(request.name.as_deref(), Some("The Point"));
        assert_eq!(request.owner_id, None);
    }

    #[test]
    fn test_types_param_splits_and_trims() {
        let params = MenuItemTypesParams {
            types: Some("Pizza, Dim Sum,,".to_string()),
        };
        assert_eq!(params.into_types(), vec!["Pizza", "Dim Sum"]);
        assert!(MenuItemTypesParams::default().into_types().is_empty());
    }

    #[test]
    fn test_response_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::<()>::ok()).unwrap();
        assert_eq!(body, json!({ "success": true }));

        let body = serde_json::to_value(ApiResponse::rejected(0, "already")).unwrap();
        assert_eq!(body, json!({ "success": false, "data": 0, "message": "already" }));
    }
}
