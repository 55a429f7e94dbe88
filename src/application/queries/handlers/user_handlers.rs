//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    CityRecord, CityRepositoryPort, FollowFilter, FollowRecord, FollowsRepositoryPort,
    OwnerRecord, OwnerRepositoryPort, UserRecord, UserRepositoryPort, UserSummary,
    VerificationRepositoryPort, VerifiedUserRecord,
};
use crate::application::queries::{
    FindUsersByCity, ListCities, ListOwners, ListVerifiedUsers, SearchUsers, UserSearch,
    ViewFollows,
};
use crate::domain::{CityRef, FollowClause, UserId};

/// ListOwners Handler
pub struct ListOwnersHandler {
    owner_repo: Arc<dyn OwnerRepositoryPort>,
}

impl ListOwnersHandler {
    pub fn new(owner_repo: Arc<dyn OwnerRepositoryPort>) -> Self {
        Self { owner_repo }
    }

    pub async fn handle(&self, _query: ListOwners) -> Result<Vec<OwnerRecord>, ApplicationError> {
        Ok(self.owner_repo.find_all().await?)
    }
}

/// ListCities Handler
pub struct ListCitiesHandler {
    city_repo: Arc<dyn CityRepositoryPort>,
}

impl ListCitiesHandler {
    pub fn new(city_repo: Arc<dyn CityRepositoryPort>) -> Self {
        Self { city_repo }
    }

    pub async fn handle(&self, _query: ListCities) -> Result<Vec<CityRecord>, ApplicationError> {
        Ok(self.city_repo.find_all().await?)
    }
}

/// SearchUsers Handler
pub struct SearchUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl SearchUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: SearchUsers) -> Result<Vec<UserRecord>, ApplicationError> {
        let users = match &query.criterion {
            UserSearch::ById(pattern) => self.user_repo.search_by_id(pattern.trim()).await?,
            UserSearch::ByName(pattern) => self.user_repo.search_by_name(pattern.trim()).await?,
        };
        tracing::debug!(criterion = ?query.criterion, matches = users.len(), "User search");
        Ok(users)
    }
}

/// FindUsersByCity Handler
pub struct FindUsersByCityHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl FindUsersByCityHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, query: FindUsersByCity) -> Result<Vec<UserSummary>, ApplicationError> {
        let city = CityRef::new(query.city_name, query.province_state)
            .map_err(ApplicationError::validation)?;
        Ok(self.user_repo.find_by_city(&city).await?)
    }
}

/// ViewFollows Handler
pub struct ViewFollowsHandler {
    follows_repo: Arc<dyn FollowsRepositoryPort>,
}

impl ViewFollowsHandler {
    pub fn new(follows_repo: Arc<dyn FollowsRepositoryPort>) -> Self {
        Self { follows_repo }
    }

    pub async fn handle(&self, query: ViewFollows) -> Result<Vec<FollowRecord>, ApplicationError> {
        let parse = |raw: Option<String>| {
            raw.filter(|s| !s.trim().is_empty())
                .map(UserId::new)
                .transpose()
                .map_err(ApplicationError::validation)
        };

        let filter = match (parse(query.follower)?, parse(query.followee)?) {
            (None, None) => FollowFilter::All,
            (Some(follower), None) => FollowFilter::Follower(follower),
            (None, Some(followee)) => FollowFilter::Followee(followee),
            (Some(follower), Some(followee)) => FollowFilter::Pair {
                follower,
                followee,
                clause: FollowClause::parse(query.clause.as_deref()),
            },
        };

        Ok(self.follows_repo.find(&filter).await?)
    }
}

/// ListVerifiedUsers Handler
pub struct ListVerifiedUsersHandler {
    verification_repo: Arc<dyn VerificationRepositoryPort>,
}

impl ListVerifiedUsersHandler {
    pub fn new(verification_repo: Arc<dyn VerificationRepositoryPort>) -> Self {
        Self { verification_repo }
    }

    pub async fn handle(
        &self,
        _query: ListVerifiedUsers,
    ) -> Result<Vec<VerifiedUserRecord>, ApplicationError> {
        Ok(self.verification_repo.find_all().await?)
    }
}
