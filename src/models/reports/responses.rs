use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::evaluations::entities::{Classification, ClassificationCounts};
use crate::models::groups::entities::Group;
use crate::models::learning_targets::entities::Core;
use crate::models::students::entities::Student;

// 学生在一次班组评估中的结果，附带班组平均
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct StudentTargetEntry {
    pub group_evaluation_id: i64,
    pub due_date: NaiveDate,
    pub activity_code: String,
    pub learning_target_id: i64,
    pub learning_target_identifier: i32,
    pub learning_target_name: String,
    pub classification: Classification,
    pub classification_label: String,
    /// 缺席时为空
    pub student_value: Option<i32>,
    pub group_average: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct StudentByTargetReport {
    pub student: Student,
    pub group_name: String,
    pub core: Core,
    pub core_name: String,
    /// 指定学习目标时为其简称，否则为核心领域简称
    pub target_label: String,
    pub entries: Vec<StudentTargetEntry>,
    pub student_average: Option<f64>,
    pub group_average: Option<f64>,
}

// 某个学习目标下的等级分布
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TargetClassificationRow {
    pub learning_target_id: i64,
    pub identifier: i32,
    pub name: String,
    pub abbreviated_name: String,
    pub counts: ClassificationCounts,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CourseByCoreReport {
    pub group: Group,
    pub core: Core,
    pub core_name: String,
    pub rows: Vec<TargetClassificationRow>,
    pub totals: ClassificationCounts,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct StudentByCoreReport {
    pub student: Student,
    pub group_name: String,
    pub core: Core,
    pub core_name: String,
    pub rows: Vec<TargetClassificationRow>,
    pub totals: ClassificationCounts,
}
