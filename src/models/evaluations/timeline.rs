//! 学生评估时间线
//!
//! 把某个学生按时间升序排列的等级变更记录还原成带标签的日期区间。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::StudentEvaluationChange;

pub const NOT_EVALUATED_LABEL: &str = "No evaluado";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationInterval {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EvaluationInterval {
    fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// 构造时间线
///
/// `changes` 须已按创建时间升序排列；`today` 由调用方在渲染时传入。
/// 区间数量恒等于变更数 + 1。
pub fn build_timeline(
    group_evaluation_created_at: DateTime<Utc>,
    changes: &[StudentEvaluationChange],
    today: NaiveDate,
) -> Vec<EvaluationInterval> {
    let origin = group_evaluation_created_at.date_naive();

    let (Some(first), Some(last)) = (changes.first(), changes.last()) else {
        return vec![EvaluationInterval::new(NOT_EVALUATED_LABEL, origin, today)];
    };

    let mut intervals = Vec::with_capacity(changes.len() + 1);
    intervals.push(EvaluationInterval::new(
        NOT_EVALUATED_LABEL,
        origin,
        first.created_at.date_naive(),
    ));

    for pair in changes.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        intervals.push(EvaluationInterval::new(
            prev.to_classification.display_name(),
            prev.created_at.date_naive(),
            curr.created_at.date_naive(),
        ));
    }

    intervals.push(EvaluationInterval::new(
        last.to_classification.display_name(),
        last.created_at.date_naive(),
        today,
    ));

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::Classification;
    use chrono::TimeZone;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn at(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, hour, 30, 0).unwrap()
    }

    fn change(id: i64, d: u32, from: Classification, to: Classification) -> StudentEvaluationChange {
        StudentEvaluationChange {
            id,
            student_evaluation_id: 1,
            from_classification: from,
            to_classification: to,
            created_at: at(d, 15),
        }
    }

    #[test]
    fn test_no_changes_yields_single_interval() {
        let intervals = build_timeline(at(1, 9), &[], day(2));
        assert_eq!(
            intervals,
            vec![EvaluationInterval::new(NOT_EVALUATED_LABEL, day(1), day(2))]
        );
    }

    #[test]
    fn test_changes_become_labelled_intervals() {
        let changes = vec![
            change(1, 2, Classification::NotEvaluated, Classification::ModeratelyAccomplished),
            change(2, 4, Classification::ModeratelyAccomplished, Classification::Achieved),
        ];
        let intervals = build_timeline(at(1, 9), &changes, day(6));
        assert_eq!(
            intervals,
            vec![
                EvaluationInterval::new(NOT_EVALUATED_LABEL, day(1), day(2)),
                EvaluationInterval::new("Nivel 2", day(2), day(4)),
                EvaluationInterval::new("Nivel 3", day(4), day(6)),
            ]
        );
    }

    #[test]
    fn test_interval_count_is_changes_plus_one() {
        let changes = vec![
            change(1, 2, Classification::NotEvaluated, Classification::NotAchieved),
            change(2, 3, Classification::NotAchieved, Classification::ModeratelyAccomplished),
            change(3, 3, Classification::ModeratelyAccomplished, Classification::Achieved),
        ];
        let intervals = build_timeline(at(1, 9), &changes, day(10));
        assert_eq!(intervals.len(), changes.len() + 1);
        assert_eq!(intervals[1].label, "Nivel 1");
        assert_eq!(intervals[2].start, intervals[2].end);
        assert_eq!(intervals[3].end, day(10));
    }
}
