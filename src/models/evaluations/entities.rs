use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 学生达成等级
    ///
    /// 数值 1/3/5/7 之间的空档保留给未来的中间等级。
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
    pub enum Classification {
        Achieved => ("achieved", "Nivel 3"),
        ModeratelyAccomplished => ("moderately_accomplished", "Nivel 2"),
        NotAchieved => ("not_achieved", "Nivel 1"),
        NotEvaluated => ("not_evaluated", "Alumno ausente"),
    }
}

impl Classification {
    /// 持久化使用的数值
    pub fn value(&self) -> i32 {
        match self {
            Classification::NotEvaluated => 1,
            Classification::NotAchieved => 3,
            Classification::ModeratelyAccomplished => 5,
            Classification::Achieved => 7,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(Classification::NotEvaluated),
            3 => Some(Classification::NotAchieved),
            5 => Some(Classification::ModeratelyAccomplished),
            7 => Some(Classification::Achieved),
            _ => None,
        }
    }

    /// 报表与图表使用的标签
    pub fn report_label(&self) -> &'static str {
        match self {
            Classification::Achieved => "Logrado",
            Classification::ModeratelyAccomplished => "Medianamente logrado",
            Classification::NotAchieved => "Por lograr",
            Classification::NotEvaluated => "Ausente",
        }
    }

    pub fn chart_color(&self) -> &'static str {
        match self {
            Classification::Achieved => "#689F38",
            Classification::ModeratelyAccomplished => "#4688F1",
            Classification::NotAchieved => "#D9453D",
            Classification::NotEvaluated => "#FCE205",
        }
    }

    /// 计入补救比例的等级
    pub fn is_remedial(&self) -> bool {
        matches!(
            self,
            Classification::NotAchieved | Classification::NotEvaluated
        )
    }
}

impl Default for Classification {
    fn default() -> Self {
        Classification::NotEvaluated
    }
}

impl TryFrom<i32> for Classification {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Classification::from_value(value).ok_or_else(|| format!("Invalid classification: {value}"))
    }
}

crate::define_string_enum! {
    /// 班组评估生命周期：草稿 → 已提交，不可回退
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
    pub enum GroupEvaluationStatus {
        Draft => ("draft", "Borrador"),
        Sent => ("sent", "Enviada"),
    }
}

impl GroupEvaluationStatus {
    pub fn value(&self) -> i32 {
        match self {
            GroupEvaluationStatus::Draft => 0,
            GroupEvaluationStatus::Sent => 1,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(GroupEvaluationStatus::Draft),
            1 => Some(GroupEvaluationStatus::Sent),
            _ => None,
        }
    }
}

crate::define_string_enum! {
    /// 评估任务的派生状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
    pub enum EvaluationStatus {
        Completed => ("completed", "Completada"),
        Current => ("current", "Vigente"),
        Late => ("late", "Atrasada"),
    }
}

impl EvaluationStatus {
    /// 前端徽标样式
    pub fn css_class(&self) -> &'static str {
        match self {
            EvaluationStatus::Completed => "success",
            EvaluationStatus::Current => "warning",
            EvaluationStatus::Late => "danger",
        }
    }
}

// 评估任务
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GeneralEvaluation {
    pub id: i64,
    pub school_id: i64,
    pub activity_id: i64,
    pub due_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 班组对教案字段的改写
///
/// 作为请求体时：`Some("")` 清除改写，`None` 保持不变。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct LessonPlanOverrides {
    pub beginning: Option<String>,
    pub development: Option<String>,
    pub conclusion: Option<String>,
    pub identity_and_autonomy_target: Option<String>,
    pub coexistence_and_citizenship_target: Option<String>,
    pub corporality_and_movement_target: Option<String>,
    pub materials: Option<String>,
}

// 班组评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct GroupEvaluation {
    pub id: i64,
    pub evaluation_id: i64,
    pub group_id: i64,
    pub status: GroupEvaluationStatus,
    pub overrides: LessonPlanOverrides,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 学生评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentEvaluation {
    pub id: i64,
    pub group_evaluation_id: i64,
    pub student_id: i64,
    pub classification: Classification,
    pub annotations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentEvaluation {
    pub fn finished(&self) -> bool {
        self.classification == Classification::Achieved
    }
}

// 等级变更记录（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct StudentEvaluationChange {
    pub id: i64,
    pub student_evaluation_id: i64,
    pub from_classification: Classification,
    pub to_classification: Classification,
    pub created_at: DateTime<Utc>,
}

// 各等级人数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ClassificationCounts {
    pub achieved: i64,
    pub moderately_accomplished: i64,
    pub not_achieved: i64,
    pub not_evaluated: i64,
}

impl ClassificationCounts {
    pub fn get(&self, classification: Classification) -> i64 {
        match classification {
            Classification::Achieved => self.achieved,
            Classification::ModeratelyAccomplished => self.moderately_accomplished,
            Classification::NotAchieved => self.not_achieved,
            Classification::NotEvaluated => self.not_evaluated,
        }
    }

    pub fn add(&mut self, classification: Classification) {
        match classification {
            Classification::Achieved => self.achieved += 1,
            Classification::ModeratelyAccomplished => self.moderately_accomplished += 1,
            Classification::NotAchieved => self.not_achieved += 1,
            Classification::NotEvaluated => self.not_evaluated += 1,
        }
    }

    pub fn merge(&mut self, other: &ClassificationCounts) {
        self.achieved += other.achieved;
        self.moderately_accomplished += other.moderately_accomplished;
        self.not_achieved += other.not_achieved;
        self.not_evaluated += other.not_evaluated;
    }

    pub fn total(&self) -> i64 {
        self.achieved + self.moderately_accomplished + self.not_achieved + self.not_evaluated
    }

    /// 未达成与缺席人数之和
    pub fn remedial(&self) -> i64 {
        self.not_achieved + self.not_evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_values_round_trip() {
        for classification in Classification::ALL {
            assert_eq!(
                Classification::from_value(classification.value()),
                Some(*classification)
            );
        }
        assert_eq!(Classification::from_value(2), None);
        assert!(Classification::try_from(9).is_err());
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::Achieved.display_name(), "Nivel 3");
        assert_eq!(Classification::NotEvaluated.display_name(), "Alumno ausente");
        assert_eq!(Classification::NotAchieved.report_label(), "Por lograr");
        assert_eq!(Classification::default(), Classification::NotEvaluated);
    }

    #[test]
    fn test_classification_serde_rejects_unknown() {
        let parsed: Classification = serde_json::from_str("\"moderately_accomplished\"").unwrap();
        assert_eq!(parsed, Classification::ModeratelyAccomplished);
        assert!(serde_json::from_str::<Classification>("\"excellent\"").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(GroupEvaluationStatus::Sent.display_name(), "Enviada");
        assert_eq!(GroupEvaluationStatus::from_value(0), Some(GroupEvaluationStatus::Draft));
        assert_eq!(EvaluationStatus::Late.css_class(), "danger");
        assert_eq!(EvaluationStatus::Completed.display_name(), "Completada");
    }

    #[test]
    fn test_counts_total_and_remedial() {
        let mut counts = ClassificationCounts::default();
        counts.add(Classification::Achieved);
        counts.add(Classification::NotAchieved);
        counts.add(Classification::NotEvaluated);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.remedial(), 2);
        assert_eq!(counts.get(Classification::Achieved), 1);
    }
}
