use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::notify::Notifier;
use crate::session::SessionGate;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<DatabaseConnection>,
    pub notifier: Notifier,
    pub sessions: SessionGate,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(database: DatabaseConnection, notifier: Notifier, sessions: SessionGate) -> Self {
        Self {
            database: Arc::new(database),
            notifier,
            sessions,
            start_time: Instant::now(),
        }
    }
}
