use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use common::validation::{Presence, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Reimbursement {
    pub id: i32,
    pub amount: BigDecimal,
    pub submitted: DateTime<Utc>,
    pub resolved: Option<DateTime<Utc>>,
    pub description: String,
    pub author_id: i32,
    pub resolver_id: Option<i32>,
    pub status_id: i32,
    pub type_id: i32,
}

impl Schema for Reimbursement {
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
            ("amount", true),
            ("submitted", true),
            ("resolved", self.resolved.is_some()),
            ("description", self.description.is_present()),
            ("author_id", self.author_id.is_present()),
            ("resolver_id", self.resolver_id.is_present()),
            ("status_id", self.status_id.is_present()),
            ("type_id", self.type_id.is_present()),
        ]
    }
}
