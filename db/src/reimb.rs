use async_trait::async_trait;
use common::error::{AppError, Res};
use sqlx::PgPool;

use crate::{dtos::reimb::ReimbPayload, models::reimb::Reimbursement};

const BASE_QUERY: &str = r#"
    SELECT id, amount, submitted, resolved, description, author_id, resolver_id, status_id, type_id
    FROM reimbursements
"#;

/// Storage of reimbursements. `None` means no matching row; every storage
/// fault is reported as an internal error.
#[async_trait]
pub trait ReimbRepository: Send + Sync {
    async fn get_all(&self) -> Res<Vec<Reimbursement>>;
    async fn get_by_id(&self, id: i32) -> Res<Option<Reimbursement>>;
    /// Inserts with `submitted` set by the database and no resolution yet.
    async fn save(&self, new_reimb: &ReimbPayload) -> Res<Reimbursement>;
    async fn update(&self, updated_reimb: &ReimbPayload) -> Res<bool>;
    async fn delete_by_id(&self, id: i32) -> Res<bool>;
}

#[derive(Clone)]
pub struct PgReimbRepository {
    pool: PgPool,
}

impl PgReimbRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReimbRepository for PgReimbRepository {
    async fn get_all(&self) -> Res<Vec<Reimbursement>> {
        sqlx::query_as::<_, Reimbursement>(&format!("{BASE_QUERY} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_by_id(&self, id: i32) -> Res<Option<Reimbursement>> {
        sqlx::query_as::<_, Reimbursement>(&format!("{BASE_QUERY} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn save(&self, new_reimb: &ReimbPayload) -> Res<Reimbursement> {
        sqlx::query_as::<_, Reimbursement>(
            r#"
            INSERT INTO reimbursements (amount, submitted, resolved, description, author_id, resolver_id, status_id, type_id)
            VALUES ($1, CURRENT_TIMESTAMP, NULL, $2, $3, NULL, $4, $5)
            RETURNING id, amount, submitted, resolved, description, author_id, resolver_id, status_id, type_id
            "#,
        )
        .bind(&new_reimb.amount)
        .bind(&new_reimb.description)
        .bind(new_reimb.author_id)
        .bind(new_reimb.status_id)
        .bind(new_reimb.type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update(&self, updated_reimb: &ReimbPayload) -> Res<bool> {
        // resolved is stamped once, when a resolver is first assigned
        let result = sqlx::query(
            r#"
            UPDATE reimbursements
            SET amount = $2,
                description = $3,
                resolver_id = $4,
                resolved = CASE
                    WHEN $4::integer IS NULL THEN NULL
                    ELSE COALESCE(resolved, CURRENT_TIMESTAMP)
                END,
                status_id = $5,
                type_id = $6
            WHERE id = $1
            "#,
        )
        .bind(updated_reimb.id)
        .bind(&updated_reimb.amount)
        .bind(&updated_reimb.description)
        .bind(updated_reimb.resolver_id)
        .bind(updated_reimb.status_id)
        .bind(updated_reimb.type_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i32) -> Res<bool> {
        let result = sqlx::query("DELETE FROM reimbursements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
