use super::entities::Group;
use crate::models::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group: Group,
    pub level_name: String,
    pub student_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListResponse {
    pub items: Vec<GroupListItem>,
    pub pagination: PaginationInfo,
}
