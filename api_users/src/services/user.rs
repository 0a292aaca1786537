use std::sync::Arc;

use common::{
    error::{AppError, Res},
    password::{hash_password, verify_password},
    validation::{validate_empty_obj, validate_id, validate_obj, validate_string},
};
use db::{dtos::user::UserPayload, models::user::User, user::UserRepository};

use crate::dtos::user::UserResponse;

/// Business rules for users: shape validation, username/email uniqueness,
/// password hashing and redaction.
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Retrieves every user, without passwords.
    ///
    /// # Returns
    ///
    /// `DataNotFound` when there are no users at all.
    pub async fn get_all_users(&self) -> Res<Vec<UserResponse>> {
        let users = self.user_repo.get_all().await?;

        if users.is_empty() {
            return Err(AppError::DataNotFound(
                "No users found in the database".to_string(),
            ));
        }

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Retrieves a user by its raw path id.
    ///
    /// # Returns
    ///
    /// `InvalidRequest` for an id that is not a positive integer,
    /// `DataNotFound` when no user has that id.
    pub async fn get_user_by_id(&self, raw_id: &str) -> Res<UserResponse> {
        let id = validate_id(raw_id).ok_or_else(|| AppError::InvalidRequest("Invalid id".to_string()))?;

        let user = self.user_repo.get_by_id(id).await?;

        match user {
            Some(user) if validate_obj(Some(&user), &[]) => Ok(user.into()),
            _ => Err(AppError::DataNotFound(format!("No user was found with id: {}", id))),
        }
    }

    /// Creates a user after checking that username and email are unused.
    /// The password is stored hashed.
    pub async fn save_user(&self, new_user: UserPayload) -> Res<UserResponse> {
        if !validate_obj(Some(&new_user), &["user_id"]) {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        }
        let (Some(username), Some(email), Some(password)) =
            (&new_user.username, &new_user.email, &new_user.password)
        else {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        };

        let username_check = self.user_repo.get_by_unique_key("username", username).await?;
        let email_check = self.user_repo.get_by_unique_key("email", email).await?;

        if username_check.is_some() || email_check.is_some() {
            log::debug!("Rejected new user {}: username or email taken", username);
            return Err(AppError::Conflict(
                "Username and email must be unique".to_string(),
            ));
        }

        let password = hash_password(password)?;
        let stored_user = self
            .user_repo
            .save(&UserPayload {
                user_id: None,
                password: Some(password),
                ..new_user
            })
            .await?;

        Ok(stored_user.into())
    }

    /// Replaces every field of an existing user. Username and email may only
    /// collide with the user being updated.
    pub async fn update_user(&self, updated_user: UserPayload) -> Res<bool> {
        if !validate_obj(Some(&updated_user), &[]) {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        }
        let (Some(user_id), Some(username), Some(email), Some(password)) = (
            updated_user.user_id,
            &updated_user.username,
            &updated_user.email,
            &updated_user.password,
        ) else {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        };

        let username_check = self.user_repo.get_by_unique_key("username", username).await?;
        let email_check = self.user_repo.get_by_unique_key("email", email).await?;

        if taken_by_other(username_check.as_ref(), user_id) {
            return Err(AppError::Conflict("Username must be unique".to_string()));
        }
        if taken_by_other(email_check.as_ref(), user_id) {
            return Err(AppError::Conflict("Email must be unique".to_string()));
        }

        let password = hash_password(password)?;
        self.user_repo
            .update(&UserPayload {
                password: Some(password),
                ..updated_user
            })
            .await?;

        Ok(true)
    }

    pub async fn delete_user_by_id(&self, raw_id: &str) -> Res<bool> {
        let id = validate_id(raw_id).ok_or_else(|| AppError::InvalidRequest("Invalid id".to_string()))?;

        self.user_repo.delete_by_id(id).await?;

        Ok(true)
    }

    /// Verifies a username/password pair.
    ///
    /// The user must exist first (`Authentication` otherwise); only then is
    /// the password checked (`InvalidRequest` on mismatch).
    pub async fn authentication(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Res<UserResponse> {
        let (username, password) = match (username, password) {
            (Some(username), Some(password)) if validate_string(&[Some(username), Some(password)]) => {
                (username, password)
            }
            _ => {
                return Err(AppError::InvalidRequest(
                    "Invalid credentials provided".to_string(),
                ));
            }
        };

        let auth_user = self.user_repo.get_by_username(username).await?;

        let auth_user = match auth_user {
            Some(user) if !validate_empty_obj(Some(&user)) => user,
            _ => {
                log::debug!("Authentication failed for unknown user {}", username);
                return Err(AppError::Authentication("Authentication failed".to_string()));
            }
        };

        if !verify_password(password, &auth_user.password) {
            log::debug!("Authentication failed for {}: wrong password", username);
            return Err(AppError::InvalidRequest("Invalid password".to_string()));
        }

        Ok(auth_user.into())
    }
}

fn taken_by_other(existing: Option<&User>, user_id: i32) -> bool {
    existing.is_some_and(|user| user.user_id != user_id)
}
