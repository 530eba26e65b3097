use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error::{self, BusinessError},
    modules::user::{
        model::{InsertUser, SignInBody, SignUpBody, UserResponse},
        repository::UserRepository,
    },
    utils::{hash_password, verify_password, Claims},
    ENV,
};

#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository + Send + Sync,
{
    repo: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(repo: Arc<U>) -> Self {
        UserService { repo }
    }

    pub async fn sign_up(&self, body: SignUpBody) -> Result<Uuid, error::SystemError> {
        if self.repo.find_by_email(&body.email).await?.is_some() {
            return Err(BusinessError::EmailAlreadyExists.into());
        }

        let hash_password = hash_password(&body.password)?;
        let new_user =
            InsertUser { email: body.email, hash_password, nickname: body.nickname };

        let user_id = self.repo.create(&new_user).await?;
        Ok(user_id)
    }

    pub async fn sign_in(&self, body: SignInBody) -> Result<String, error::SystemError> {
        let user = self
            .repo
            .find_by_email(&body.email)
            .await?
            .ok_or(BusinessError::InvalidCredentials)?;

        let valid = verify_password(&user.hash_password, &body.password)?;
        if !valid {
            return Err(BusinessError::InvalidCredentials.into());
        }

        let access_token = Claims::new(&user.id, ENV.access_token_expiration)
            .encode(ENV.jwt_secret.as_ref())?;

        Ok(access_token)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let user = self.repo.find_by_id(&id).await?.ok_or(BusinessError::UserNotFound)?;
        Ok(UserResponse::from(user))
    }
}
