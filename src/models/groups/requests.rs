use super::entities::GroupLevel;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct GroupListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub level: Option<GroupLevel>,
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct CreateGroupRequest {
    pub name: String,
    pub level: GroupLevel,
    pub responsible_professor_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub level: Option<GroupLevel>,
    pub responsible_professor_id: Option<i64>,
    pub active: Option<bool>,
}

// 班组列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GroupListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub level: Option<GroupLevel>,
    pub search: Option<String>,
    pub include_inactive: bool,
}
