use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{
    Classification, ClassificationCounts, EvaluationStatus, GeneralEvaluation, GroupEvaluation,
    StudentEvaluation, StudentEvaluationChange,
};
use super::lesson_plan::ResolvedLessonPlan;
use super::timeline::EvaluationInterval;
use crate::models::PaginationInfo;
use crate::models::groups::entities::{Group, GroupLevel};
use crate::models::learning_targets::entities::{Activity, LearningTarget};
use crate::models::students::entities::Student;

// 评估任务列表项（含派生状态）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub evaluation: GeneralEvaluation,
    pub activity_code: String,
    pub learning_target_name: String,
    pub level: GroupLevel,
    pub group_count: i64,
    pub sent_count: i64,
    pub completion_percent: f64,
    pub status: EvaluationStatus,
    pub status_label: String,
    pub status_class: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<EvaluationListItem>,
    pub pagination: PaginationInfo,
}

// 班组评估摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group_evaluation: GroupEvaluation,
    pub group_name: String,
    pub student_count: i64,
    pub counts: ClassificationCounts,
    pub needs_remedial: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetailResponse {
    pub evaluation: EvaluationListItem,
    pub groups: Vec<GroupEvaluationSummary>,
}

// 创建/编辑评估任务后的写入统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ReconciliationSummary {
    pub groups_added: i64,
    pub groups_removed: i64,
    pub student_evaluations_created: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationMutationResponse {
    pub evaluation: GeneralEvaluation,
    pub summary: ReconciliationSummary,
}

// 教师视角的班组评估列表项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group_evaluation: GroupEvaluation,
    pub status_label: String,
    pub group_name: String,
    pub level: GroupLevel,
    pub activity_code: String,
    pub learning_target_name: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationListResponse {
    pub items: Vec<GroupEvaluationListItem>,
    pub pagination: PaginationInfo,
}

// 评分表中的一行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentEvaluationRow {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student_evaluation: StudentEvaluation,
    pub student_name: String,
    pub list_number: i32,
    pub classification_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationDetailResponse {
    pub group_evaluation: GroupEvaluation,
    pub status_label: String,
    pub group: Group,
    pub evaluation: GeneralEvaluation,
    pub activity: Activity,
    pub learning_target: LearningTarget,
    pub lesson_plan: ResolvedLessonPlan,
    /// 当前用户能否改写开始/发展/结束环节
    pub can_edit_experience: bool,
    pub students: Vec<StudentEvaluationRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GradingOutcome {
    pub updated: i64,
    pub changes_recorded: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluationStatsResponse {
    pub group_evaluation_id: i64,
    pub status: String,
    pub total_students: i64,
    pub counts: ClassificationCounts,
    pub needs_remedial: bool,
    pub remedial_percent: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentEvolutionResponse {
    pub student: Student,
    pub group_evaluation_id: i64,
    pub student_evaluation_id: i64,
    pub classification: Classification,
    pub changes: Vec<StudentEvaluationChange>,
    pub intervals: Vec<EvaluationInterval>,
}
