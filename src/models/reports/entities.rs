use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::evaluations::entities::Classification;
use crate::models::groups::entities::GroupLevel;
use crate::models::learning_targets::entities::Core;

/// 报表使用的扁平化评估事实
///
/// 一行对应一条学生评估，已经联结班组评估、评估任务、活动与学习目标。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct EvaluationFact {
    pub student_evaluation_id: i64,
    pub student_id: i64,
    pub group_evaluation_id: i64,
    pub group_id: i64,
    pub evaluation_id: i64,
    pub due_date: NaiveDate,
    pub activity_code: String,
    pub learning_target_id: i64,
    pub learning_target_identifier: i32,
    pub learning_target_name: String,
    pub learning_target_abbreviated_name: String,
    pub core: Core,
    pub level: GroupLevel,
    pub classification: Classification,
}

/// 评估事实的过滤条件（存储层）
///
/// 只返回已提交的班组评估中的数据。
#[derive(Debug, Clone, Default)]
pub struct EvaluationFactFilter {
    pub school_id: Option<i64>,
    pub group_ids: Option<Vec<i64>>,
    pub group_id: Option<i64>,
    pub student_id: Option<i64>,
    pub group_evaluation_ids: Option<Vec<i64>>,
    pub core: Option<Core>,
    pub level: Option<GroupLevel>,
    pub learning_target_id: Option<i64>,
}
