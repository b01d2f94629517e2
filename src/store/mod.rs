//! Record store for inspection requests. Rows are append-mostly: after
//! insert, only `status` and `admin_notes` ever change, and rows are never
//! deleted. Schema creation lives in the `migration` crate, applied once at
//! startup rather than on every request.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::inspection_request;

/// A validated submission, everything but the store-assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub occupancy: Option<String>,
    pub escrow_date: Option<NaiveDate>,
    pub lockbox: Option<String>,
    pub meeting_someone: Option<String>,
    pub text_consent: String,
}

/// Persists a new request and returns the stored row, id assigned. The row
/// comes back from the insert statement itself, so once this returns Ok the
/// caller holds the durable record without a second round trip.
pub async fn insert(
    db: &DatabaseConnection,
    request: NewRequest,
) -> Result<inspection_request::Model, DbErr> {
    let row = inspection_request::ActiveModel {
        id: ActiveValue::NotSet,
        created_at: ActiveValue::Set(Utc::now().fixed_offset()),
        name: ActiveValue::Set(request.name),
        phone: ActiveValue::Set(request.phone),
        address: ActiveValue::Set(request.address),
        occupancy: ActiveValue::Set(request.occupancy),
        escrow_date: ActiveValue::Set(request.escrow_date),
        lockbox: ActiveValue::Set(request.lockbox),
        meeting_someone: ActiveValue::Set(request.meeting_someone),
        text_consent: ActiveValue::Set(request.text_consent),
        status: ActiveValue::Set("New".to_string()),
        admin_notes: ActiveValue::NotSet,
    };

    let record = inspection_request::Entity::insert(row)
        .exec_with_returning(db)
        .await?;
    assert!(record.id > 0, "Store assigned a non-positive id");
    Ok(record)
}

/// All rows, newest first. No pagination: the admin dashboard and the CSV
/// export both render the full table.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<inspection_request::Model>, DbErr> {
    inspection_request::Entity::find()
        .order_by_desc(inspection_request::Column::Id)
        .all(db)
        .await
}

pub async fn get(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<inspection_request::Model>, DbErr> {
    inspection_request::Entity::find_by_id(id).one(db).await
}

/// Mutates exactly `status` and `admin_notes` on one row. A missing id is a
/// silent no-op; callers that care must re-fetch. Last write wins under
/// concurrent admin edits.
pub async fn update_status_and_notes(
    db: &DatabaseConnection,
    id: i64,
    status: String,
    notes: Option<String>,
) -> Result<(), DbErr> {
    inspection_request::Entity::update_many()
        .col_expr(inspection_request::Column::Status, Expr::value(status))
        .col_expr(inspection_request::Column::AdminNotes, Expr::value(notes))
        .filter(inspection_request::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
