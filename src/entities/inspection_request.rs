//! Inspection request entity, one row per public intake submission.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspection_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Set once at insert time, never updated afterwards
    pub created_at: DateTimeWithTimeZone,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub occupancy: Option<String>,
    pub escrow_date: Option<Date>,
    pub lockbox: Option<String>,
    pub meeting_someone: Option<String>,
    /// "Yes" when the submitter ticked the text-consent checkbox, "No" otherwise
    pub text_consent: String,
    /// Open string; the admin console offers New/Contacted/Scheduled/Completed/Cancelled
    pub status: String,
    /// Editable only through the admin console
    pub admin_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
