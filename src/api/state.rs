//! Application state for shared services

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::config::{AppInfo, ErrorMapping};
use crate::domain::{OperationError, User, UserRepository};
use crate::infrastructure::user::UserService;
use crate::infrastructure::validator::Validator;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub validator: Validator,
    pub error_mapping: ErrorMapping,
    pub app: AppInfo,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self {
            user_service,
            validator: Validator::new(),
            error_mapping: ErrorMapping::default(),
            app: AppInfo::default(),
        }
    }

    pub fn with_error_mapping(mut self, mapping: ErrorMapping) -> Self {
        self.error_mapping = mapping;
        self
    }

    pub fn with_app_info(mut self, app: AppInfo) -> Self {
        self.app = app;
        self
    }
}

/// Trait for user use-cases
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_user_by_id(&self, user: User) -> Result<User, OperationError>;
    async fn create_user(&self, user: User) -> Result<User, OperationError>;
    async fn update_user(&self, user: User) -> Result<(), OperationError>;
    async fn delete_user(&self, user: User) -> Result<(), OperationError>;
}

#[async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn get_user_by_id(&self, user: User) -> Result<User, OperationError> {
        UserService::get_user_by_id(self, user).await
    }

    async fn create_user(&self, user: User) -> Result<User, OperationError> {
        UserService::create_user(self, user).await
    }

    async fn update_user(&self, user: User) -> Result<(), OperationError> {
        UserService::update_user(self, user).await
    }

    async fn delete_user(&self, user: User) -> Result<(), OperationError> {
        UserService::delete_user(self, user).await
    }
}
