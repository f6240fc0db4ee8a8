pub mod anecdotal_records;
pub mod common;
pub mod evaluations;
pub mod groups;
pub mod learning_targets;
pub mod reports;
pub mod schools;
pub mod students;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery,
};

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}
