use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Classification, GroupEvaluationStatus, LessonPlanOverrides};
use crate::models::common::PaginationQuery;
use crate::models::groups::entities::GroupLevel;

// 评估任务列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub level: Option<GroupLevel>,
    /// 按活动代码搜索
    pub search: Option<String>,
}

// 评估任务列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct EvaluationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub level: Option<GroupLevel>,
    pub search: Option<String>,
}

// 创建评估任务
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CreateEvaluationRequest {
    pub activity_id: i64,
    /// 缺省时为今天加上配置的默认天数
    pub due_date: Option<NaiveDate>,
    pub group_ids: Vec<i64>,
}

/// 存储层使用的新建评估参数（学校与截止日期已确定）
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub school_id: i64,
    pub activity_id: i64,
    pub due_date: NaiveDate,
    pub group_ids: Vec<i64>,
}

// 更新评估任务；提供 `group_ids` 时触发班组对账
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UpdateEvaluationRequest {
    pub activity_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub group_ids: Option<Vec<i64>>,
}

// 班组评估列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<GroupEvaluationStatus>,
    pub group_id: Option<i64>,
}

// 班组评估列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GroupEvaluationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<GroupEvaluationStatus>,
    pub group_id: Option<i64>,
}

// 单个学生的评分输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentGradeInput {
    /// 学生评估 ID
    pub id: i64,
    pub classification: Classification,
    pub annotations: Option<String>,
}

// 批量评分提交
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GradeGroupEvaluationRequest {
    #[serde(default)]
    pub student_evaluations: Vec<StudentGradeInput>,
    pub overrides: Option<LessonPlanOverrides>,
}
