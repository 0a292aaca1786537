use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use common::validation::{Presence, Schema};
use serde::{Deserialize, Serialize};

/// Reimbursement body as sent by clients for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReimbPayload {
    pub id: Option<i32>,
    pub amount: Option<BigDecimal>,
    pub submitted: Option<DateTime<Utc>>,
    pub resolved: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub author_id: Option<i32>,
    pub resolver_id: Option<i32>,
    pub status_id: Option<i32>,
    pub type_id: Option<i32>,
}

impl Schema for ReimbPayload {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "amount",
        "submitted",
        "resolved",
        "description",
        "author_id",
        "resolver_id",
        "status_id",
        "type_id",
    ];

    fn presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("id", self.id.is_present()),
            ("amount", self.amount.is_some()),
            ("submitted", self.submitted.is_some()),
            ("resolved", self.resolved.is_some()),
            ("description", self.description.is_present()),
            ("author_id", self.author_id.is_present()),
            ("resolver_id", self.resolver_id.is_present()),
            ("status_id", self.status_id.is_present()),
            ("type_id", self.type_id.is_present()),
        ]
    }
}
