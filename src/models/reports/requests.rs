use serde::Deserialize;
use ts_rs::TS;

use crate::models::learning_targets::entities::Core;

// 学生-学习目标报表
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct StudentByTargetParams {
    pub student_id: i64,
    pub core: Core,
    pub learning_target_id: Option<i64>,
}

// 班组-核心领域报表
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CourseByCoreParams {
    pub group_id: i64,
    pub core: Core,
    pub learning_target_id: Option<i64>,
}

// 学生-核心领域报表
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct StudentByCoreParams {
    pub student_id: i64,
    pub core: Core,
    pub learning_target_id: Option<i64>,
}
