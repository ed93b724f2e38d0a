use forkful_domain::data_uri::parse_image_data_uri;
use forkful_domain::validate::{PERSON_NAME_MAX, validate_email, validate_username};

use crate::domain::repository::{
    ImageKind, ImageStore, NewUser, SubscriptionRepository, UserRepository,
};
use crate::domain::types::User;
use crate::error::CookbookServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, CookbookServiceError> {
        if !validate_email(&input.email) {
            return Err(CookbookServiceError::Validation(
                "invalid email address".to_owned(),
            ));
        }
        if !validate_username(&input.username) {
            return Err(CookbookServiceError::Validation(
                "username must be 1-150 characters of letters, digits or .@+-_".to_owned(),
            ));
        }
        for (field, value) in [
            ("first_name", &input.first_name),
            ("last_name", &input.last_name),
        ] {
            if value.trim().is_empty() || value.len() > PERSON_NAME_MAX {
                return Err(CookbookServiceError::Validation(format!(
                    "{field} must be 1-{PERSON_NAME_MAX} characters"
                )));
            }
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(CookbookServiceError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(CookbookServiceError::UsernameTaken);
        }
        let id = self
            .users
            .create(&NewUser {
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subs: S,
}

impl<U: UserRepository, S: SubscriptionRepository> GetUserUseCase<U, S> {
    /// Returns the user plus `is_subscribed` relative to the viewer
    /// (false for anonymous viewers and for the user themselves).
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        user_id: i32,
    ) -> Result<(User, bool), CookbookServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)?;
        let is_subscribed = match viewer {
            Some(viewer_id) if viewer_id != user_id => {
                self.subs.exists(viewer_id, user_id).await?
            }
            _ => false,
        };
        Ok((user, is_subscribed))
    }
}

// ── SetAvatar ────────────────────────────────────────────────────────────────

pub struct SetAvatarUseCase<U: UserRepository, S: ImageStore> {
    pub users: U,
    pub images: S,
}

impl<U: UserRepository, S: ImageStore> SetAvatarUseCase<U, S> {
    /// Decode the data-URI payload, store it, and save the reference.
    /// Returns the stored asset reference.
    pub async fn execute(
        &self,
        user_id: i32,
        avatar: &str,
    ) -> Result<String, CookbookServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)?;
        let payload = parse_image_data_uri(avatar)
            .map_err(|e| CookbookServiceError::Validation(e.to_string()))?;
        let reference = self.images.store(ImageKind::Avatar, &payload).await?;
        self.users.set_avatar(user_id, Some(&reference)).await?;
        Ok(reference)
    }
}

// ── ClearAvatar ──────────────────────────────────────────────────────────────

pub struct ClearAvatarUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ClearAvatarUseCase<U> {
    pub async fn execute(&self, user_id: i32) -> Result<(), CookbookServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)?;
        self.users.set_avatar(user_id, None).await
    }
}
