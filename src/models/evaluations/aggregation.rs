//! 评估统计
//!
//! 全部为纯函数：所需的计数由调用方查询后显式传入。

use std::collections::HashMap;

use chrono::NaiveDate;

use super::entities::{
    ClassificationCounts, EvaluationStatus, GroupEvaluationStatus, StudentEvaluation,
};

/// 补救阈值：未达成与缺席占比超过该百分比即需补救
pub const REMEDIAL_THRESHOLD_PERCENT: f64 = 20.0;

/// 保留两位小数，恰为一半时取偶数（与业务既有口径一致）
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 完成百分比
///
/// `sent` 为已提交的班组评估数，`total` 为该任务下的班组评估总数。
/// 先将比例保留两位小数再乘以 100，因此 1/3 得到 33.0。没有班组时视为 100。
pub fn completion_percent(sent: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (round2(sent as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
}

/// 评估任务状态；完成度优先于日期判断
pub fn evaluation_status(
    completion_percent: f64,
    today: NaiveDate,
    due_date: NaiveDate,
) -> EvaluationStatus {
    if completion_percent >= 100.0 {
        EvaluationStatus::Completed
    } else if today < due_date {
        EvaluationStatus::Current
    } else {
        EvaluationStatus::Late
    }
}

/// 统计各等级人数，同一学生只保留最新（ID 最大）的一条评估
pub fn classification_counts(evaluations: &[StudentEvaluation]) -> ClassificationCounts {
    let mut latest: HashMap<i64, &StudentEvaluation> = HashMap::new();
    for evaluation in evaluations {
        let entry = latest.entry(evaluation.student_id).or_insert(evaluation);
        if evaluation.id > entry.id {
            *entry = evaluation;
        }
    }

    let mut counts = ClassificationCounts::default();
    for evaluation in latest.values() {
        counts.add(evaluation.classification);
    }
    counts
}

/// 补救比例（百分比）；没有学生时返回 `None`
pub fn remedial_percent(counts: &ClassificationCounts, total_students: u64) -> Option<f64> {
    if total_students == 0 {
        return None;
    }
    Some(counts.remedial() as f64 / total_students as f64 * 100.0)
}

/// 是否需要补救
///
/// 草稿状态一律为否；没有学生时也为否。
pub fn needs_remedial(
    status: GroupEvaluationStatus,
    counts: &ClassificationCounts,
    total_students: u64,
) -> bool {
    if status == GroupEvaluationStatus::Draft {
        return false;
    }
    remedial_percent(counts, total_students)
        .is_some_and(|percent| percent > REMEDIAL_THRESHOLD_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::Classification;

    fn evaluation(id: i64, student_id: i64, classification: Classification) -> StudentEvaluation {
        StudentEvaluation {
            id,
            group_evaluation_id: 1,
            student_id,
            classification,
            annotations: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_completion_with_no_groups_is_complete() {
        assert_eq!(completion_percent(0, 0), 100.0);
    }

    #[test]
    fn test_completion_rounds_ratio_before_scaling() {
        assert_eq!(completion_percent(1, 3), 33.0);
        assert_eq!(completion_percent(2, 3), 67.0);
        assert_eq!(completion_percent(1, 2), 50.0);
        assert_eq!(completion_percent(0, 4), 0.0);
        assert_eq!(completion_percent(4, 4), 100.0);
    }

    #[test]
    fn test_completion_half_ratio_rounds_to_even() {
        assert_eq!(completion_percent(1, 8), 12.0);
        assert_eq!(completion_percent(5, 8), 62.0);
    }

    #[test]
    fn test_completion_is_clamped() {
        assert_eq!(completion_percent(5, 4), 100.0);
    }

    #[test]
    fn test_status_completion_wins_over_date() {
        assert_eq!(
            evaluation_status(100.0, date(20), date(10)),
            EvaluationStatus::Completed
        );
        assert_eq!(
            evaluation_status(50.0, date(9), date(10)),
            EvaluationStatus::Current
        );
        assert_eq!(
            evaluation_status(50.0, date(10), date(10)),
            EvaluationStatus::Late
        );
    }

    #[test]
    fn test_counts_keep_latest_per_student() {
        let rows = vec![
            evaluation(1, 100, Classification::NotAchieved),
            evaluation(5, 100, Classification::Achieved),
            evaluation(2, 200, Classification::ModeratelyAccomplished),
            evaluation(3, 300, Classification::NotEvaluated),
        ];
        let counts = classification_counts(&rows);
        assert_eq!(counts.achieved, 1);
        assert_eq!(counts.not_achieved, 0);
        assert_eq!(counts.moderately_accomplished, 1);
        assert_eq!(counts.not_evaluated, 1);
    }

    #[test]
    fn test_draft_never_needs_remedial() {
        let counts = ClassificationCounts {
            not_achieved: 10,
            ..Default::default()
        };
        assert!(!needs_remedial(GroupEvaluationStatus::Draft, &counts, 10));
    }

    #[test]
    fn test_remedial_threshold_is_strict() {
        // 1/5 = 20%，不超过阈值
        let at_threshold = ClassificationCounts {
            achieved: 4,
            not_achieved: 1,
            ..Default::default()
        };
        assert!(!needs_remedial(GroupEvaluationStatus::Sent, &at_threshold, 5));

        let above = ClassificationCounts {
            achieved: 3,
            not_achieved: 1,
            not_evaluated: 1,
            ..Default::default()
        };
        assert!(needs_remedial(GroupEvaluationStatus::Sent, &above, 5));
    }

    #[test]
    fn test_zero_students_is_defined() {
        let counts = ClassificationCounts::default();
        assert!(!needs_remedial(GroupEvaluationStatus::Sent, &counts, 0));
        assert_eq!(remedial_percent(&counts, 0), None);
    }
}
