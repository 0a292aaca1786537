use std::sync::Arc;

use common::{
    error::{AppError, Res},
    validation::{validate_id, validate_obj},
};
use db::{dtos::reimb::ReimbPayload, models::reimb::Reimbursement, reimb::ReimbRepository};

/// Fields a client never has to send: assigned by the database or only
/// known once the reimbursement is resolved.
const SERVER_ASSIGNED: [&str; 4] = ["id", "submitted", "resolved", "resolver_id"];
const UNRESOLVED: [&str; 2] = ["resolved", "resolver_id"];

#[derive(Clone)]
pub struct ReimbService {
    reimb_repo: Arc<dyn ReimbRepository>,
}

impl ReimbService {
    pub fn new(reimb_repo: Arc<dyn ReimbRepository>) -> Self {
        Self { reimb_repo }
    }

    pub async fn get_all_reimbs(&self) -> Res<Vec<Reimbursement>> {
        let reimbs = self.reimb_repo.get_all().await?;

        if reimbs.is_empty() {
            return Err(AppError::DataNotFound(
                "No reimbursements found".to_string(),
            ));
        }

        Ok(reimbs)
    }

    pub async fn get_reimb_by_id(&self, raw_id: &str) -> Res<Reimbursement> {
        let id = validate_id(raw_id).ok_or_else(|| AppError::InvalidRequest("Invalid id".to_string()))?;

        let reimb = self.reimb_repo.get_by_id(id).await?;

        match reimb {
            Some(reimb) if validate_obj(Some(&reimb), &UNRESOLVED) => Ok(reimb),
            _ => Err(AppError::DataNotFound(format!(
                "No reimbursement was found with id: {}",
                id
            ))),
        }
    }

    /// Stores a new reimbursement. `submitted` is stamped by the database and
    /// the reimbursement starts unresolved.
    pub async fn save_reimb(&self, new_reimb: ReimbPayload) -> Res<Reimbursement> {
        if !validate_obj(Some(&new_reimb), &SERVER_ASSIGNED) {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        }

        self.reimb_repo.save(&new_reimb).await
    }

    pub async fn delete_reimb_by_id(&self, raw_id: &str) -> Res<bool> {
        let id = validate_id(raw_id).ok_or_else(|| AppError::InvalidRequest("Invalid id".to_string()))?;

        if !self.reimb_repo.delete_by_id(id).await? {
            log::debug!("Delete of reimbursement {} matched no row", id);
        }

        Ok(true)
    }

    pub async fn update_reimb(&self, updated_reimb: ReimbPayload) -> Res<bool> {
        if !validate_obj(Some(&updated_reimb), &UNRESOLVED) {
            return Err(AppError::InvalidRequest("Entry is not valid".to_string()));
        }

        if updated_reimb.resolver_id.is_some() {
            log::info!(
                "Reimbursement {:?} resolved by user {:?}",
                updated_reimb.id,
                updated_reimb.resolver_id
            );
        }
        self.reimb_repo.update(&updated_reimb).await?;

        Ok(true)
    }
}
