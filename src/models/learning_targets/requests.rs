use super::entities::{Core, LessonPlan};
use crate::models::common::PaginationQuery;
use crate::models::groups::entities::GroupLevel;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct LearningTargetListParams {
    pub core: Option<Core>,
    pub level: Option<GroupLevel>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct CreateLearningTargetRequest {
    pub core: Core,
    pub level: GroupLevel,
    pub identifier: i32,
    pub name: String,
    pub abbreviated_name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct ActivityListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub learning_target_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct CreateActivityRequest {
    pub learning_target_id: i64,
    pub code: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub lesson_plan: LessonPlan,
}

// 活动列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub learning_target_id: Option<i64>,
    pub search: Option<String>,
}
