pub mod error_code;
pub mod pagination;
pub mod response;
pub mod string_enum;

pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

/// 将 i64 时间戳转换为 UTC 时间，非法值回退为纪元起点
pub fn timestamp_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
