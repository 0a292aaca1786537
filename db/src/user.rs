use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    validation::is_property_of,
};
use sqlx::PgPool;

use crate::{dtos::user::UserPayload, models::user::User};

const BASE_QUERY: &str = r#"
    SELECT user_id, username, password, first_name, last_name, email, role_id
    FROM users
"#;

/// Storage of users. `None` means no matching row; every storage fault is
/// reported as an internal error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_all(&self) -> Res<Vec<User>>;
    async fn get_by_id(&self, user_id: i32) -> Res<Option<User>>;
    async fn save(&self, new_user: &UserPayload) -> Res<User>;
    async fn update(&self, updated_user: &UserPayload) -> Res<bool>;
    async fn delete_by_id(&self, user_id: i32) -> Res<bool>;
    async fn get_by_username(&self, username: &str) -> Res<Option<User>>;
    async fn get_by_email(&self, email: &str) -> Res<Option<User>>;
    /// Looks a user up by any column of `users`. Keys that are not user
    /// fields are rejected before reaching the database.
    async fn get_by_unique_key(&self, key: &str, val: &str) -> Res<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_all(&self) -> Res<Vec<User>> {
        sqlx::query_as::<_, User>(&format!("{BASE_QUERY} ORDER BY user_id"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_id(&self, user_id: i32) -> Res<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{BASE_QUERY} WHERE user_id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn save(&self, new_user: &UserPayload) -> Res<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email, role_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, username, password, first_name, last_name, email, role_id
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(new_user.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, updated_user: &UserPayload) -> Res<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password = $3, first_name = $4, last_name = $5, email = $6, role_id = $7
            WHERE user_id = $1
            "#,
        )
        .bind(updated_user.user_id)
        .bind(&updated_user.username)
        .bind(&updated_user.password)
        .bind(&updated_user.first_name)
        .bind(&updated_user.last_name)
        .bind(&updated_user.email)
        .bind(updated_user.role_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, user_id: i32) -> Res<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_by_username(&self, username: &str) -> Res<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{BASE_QUERY} WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_email(&self, email: &str) -> Res<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{BASE_QUERY} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_unique_key(&self, key: &str, val: &str) -> Res<Option<User>> {
        if !is_property_of::<User>(key) {
            return Err(AppError::InvalidRequest(format!("Unknown user field: {}", key)));
        }
        // key is one of the fixed column names checked above
        sqlx::query_as::<_, User>(&format!("{BASE_QUERY} WHERE {key}::text = $1"))
            .bind(val)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
