//! User Command Handlers - 评论用户与关注关系

use std::sync::Arc;

use crate::application::commands::{CreateUser, DeleteUser, FollowUser, UnfollowUser, UpdateUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CityRepositoryPort, FollowsRepositoryPort, NewUser, RepositoryError, UserRepositoryPort,
    UserUpdate,
};
use crate::domain::{CityRef, UserId};

const MAX_USER_NAME_LEN: usize = 30;
const CITY_MISSING: &str = "City does not exist!";
const USER_MISSING: &str = "Could not find user with given ID!";

fn parse_user_id(raw: &str) -> Result<UserId, ApplicationError> {
    UserId::new(raw).map_err(ApplicationError::validation)
}

fn parse_name(raw: &str) -> Result<String, ApplicationError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > MAX_USER_NAME_LEN {
        return Err(ApplicationError::validation(
            "Name must be between 1 and 30 characters",
        ));
    }
    Ok(name.to_string())
}

// ============================================================================
// CreateUser
// ============================================================================

/// 创建用户结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created,
    AlreadyExists,
}

impl CreateUserOutcome {
    pub fn code(&self) -> i32 {
        match self {
            CreateUserOutcome::Created => 1,
            CreateUserOutcome::AlreadyExists => -1,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CreateUserOutcome::Created => "User created",
            CreateUserOutcome::AlreadyExists => "A user with that ID already exists!",
        }
    }
}

/// CreateUser Handler
pub struct CreateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    city_repo: Arc<dyn CityRepositoryPort>,
}

impl CreateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, city_repo: Arc<dyn CityRepositoryPort>) -> Self {
        Self { user_repo, city_repo }
    }

    pub async fn handle(&self, command: CreateUser) -> Result<CreateUserOutcome, ApplicationError> {
        let user_id = parse_user_id(&command.user_id)?;
        let name = parse_name(&command.name)?;
        let city = CityRef::new(command.city_name, command.province_state)
            .map_err(ApplicationError::validation)?;

        if self.user_repo.exists(&user_id).await? {
            return Ok(CreateUserOutcome::AlreadyExists);
        }
        if !self.city_repo.exists(&city).await? {
            return Err(ApplicationError::Precondition {
                code: None,
                message: CITY_MISSING.to_string(),
            });
        }

        let user = NewUser {
            user_id: user_id.clone(),
            name,
            city,
        };
        match self.user_repo.insert(&user).await {
            Ok(()) => {}
            // 并发请求先插入
            Err(RepositoryError::Duplicate(_)) => return Ok(CreateUserOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user_id, city = %user.city, "User created");
        Ok(CreateUserOutcome::Created)
    }
}

// ============================================================================
// UpdateUser
// ============================================================================

/// UpdateUser Handler
pub struct UpdateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    city_repo: Arc<dyn CityRepositoryPort>,
}

impl UpdateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, city_repo: Arc<dyn CityRepositoryPort>) -> Self {
        Self { user_repo, city_repo }
    }

    pub async fn handle(&self, command: UpdateUser) -> Result<(), ApplicationError> {
        let user_id = parse_user_id(&command.user_id)?;
        let name = command.name.as_deref().map(parse_name).transpose()?;

        let city = match (command.city_name, command.province_state) {
            (Some(city), Some(province)) => {
                Some(CityRef::new(city, province).map_err(ApplicationError::validation)?)
            }
            (None, None) => None,
            _ => {
                return Err(ApplicationError::validation(
                    "City and province must be changed together",
                ))
            }
        };

        if name.is_none() && city.is_none() {
            return Err(ApplicationError::validation("Nothing to update"));
        }

        if let Some(city) = &city {
            if !self.city_repo.exists(city).await? {
                return Err(ApplicationError::Precondition {
                    code: None,
                    message: CITY_MISSING.to_string(),
                });
            }
        }

        let updated = self
            .user_repo
            .update(&UserUpdate {
                user_id: user_id.clone(),
                name,
                city,
            })
            .await?;
        if updated == 0 {
            return Err(ApplicationError::not_found(USER_MISSING));
        }

        tracing::info!(user_id = %user_id, "User updated");
        Ok(())
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

/// DeleteUser Handler，返回删除行数
pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, command: DeleteUser) -> Result<u64, ApplicationError> {
        let user_id = parse_user_id(&command.user_id)?;
        let deleted = self.user_repo.delete(&user_id).await?;

        tracing::info!(user_id = %user_id, deleted, "User delete requested");
        Ok(deleted)
    }
}

// ============================================================================
// Follows
// ============================================================================

/// 关注结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    AlreadyFollowing,
}

impl FollowOutcome {
    pub fn code(&self) -> i32 {
        match self {
            FollowOutcome::Followed => 1,
            FollowOutcome::AlreadyFollowing => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FollowOutcome::Followed => "Follow added",
            FollowOutcome::AlreadyFollowing => "User is already following that user!",
        }
    }
}

/// 取消关注结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfollowOutcome {
    Unfollowed,
    NotFollowing,
}

impl UnfollowOutcome {
    pub fn code(&self) -> i32 {
        match self {
            UnfollowOutcome::Unfollowed => 1,
            UnfollowOutcome::NotFollowing => 0,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            UnfollowOutcome::Unfollowed => "Follow removed",
            UnfollowOutcome::NotFollowing => "User is not following that user!",
        }
    }
}

/// 检查关注双方都存在，follower 缺失为 -1，followee 缺失为 -2
async fn resolve_pair(
    user_repo: &dyn UserRepositoryPort,
    follower: &str,
    followee: &str,
) -> Result<(UserId, UserId), ApplicationError> {
    let follower = parse_user_id(follower)?;
    let followee = parse_user_id(followee)?;

    if !user_repo.exists(&follower).await? {
        return Err(ApplicationError::precondition(
            -1,
            "The first user does not exist!",
        ));
    }
    if !user_repo.exists(&followee).await? {
        return Err(ApplicationError::precondition(
            -2,
            "The second user does not exist!",
        ));
    }
    Ok((follower, followee))
}

/// FollowUser Handler
pub struct FollowUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    follows_repo: Arc<dyn FollowsRepositoryPort>,
}

impl FollowUserHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        follows_repo: Arc<dyn FollowsRepositoryPort>,
    ) -> Self {
        Self { user_repo, follows_repo }
    }

    pub async fn handle(&self, command: FollowUser) -> Result<FollowOutcome, ApplicationError> {
        let (follower, followee) =
            resolve_pair(self.user_repo.as_ref(), &command.follower, &command.followee).await?;

        if self.follows_repo.exists(&follower, &followee).await? {
            return Ok(FollowOutcome::AlreadyFollowing);
        }
        match self.follows_repo.insert(&follower, &followee).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate(_)) => return Ok(FollowOutcome::AlreadyFollowing),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(follower = %follower, followee = %followee, "Follow added");
        Ok(FollowOutcome::Followed)
    }
}

/// UnfollowUser Handler
pub struct UnfollowUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    follows_repo: Arc<dyn FollowsRepositoryPort>,
}

impl UnfollowUserHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        follows_repo: Arc<dyn FollowsRepositoryPort>,
    ) -> Self {
        Self { user_repo, follows_repo }
    }

    pub async fn handle(&self, command: UnfollowUser) -> Result<UnfollowOutcome, ApplicationError> {
        let (follower, followee) =
            resolve_pair(self.user_repo.as_ref(), &command.follower, &command.followee).await?;

        let deleted = self.follows_repo.delete(&follower, &followee).await?;
        if deleted == 0 {
            return Ok(UnfollowOutcome::NotFollowing);
        }

        tracing::info!(follower = %follower, followee = %followee, "Follow removed");
        Ok(UnfollowOutcome::Unfollowed)
    }
}
