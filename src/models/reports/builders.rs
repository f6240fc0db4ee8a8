//! 报表构建
//!
//! 输入为存储层返回的评估事实，输出为可直接序列化或渲染的报表数据。

use std::collections::BTreeMap;

use super::entities::EvaluationFact;
use super::responses::{StudentTargetEntry, TargetClassificationRow};
use crate::models::evaluations::aggregation::round2;
use crate::models::evaluations::entities::{Classification, ClassificationCounts};
use crate::models::learning_targets::entities::LearningTarget;

/// 等级数值的平均值，缺席不计入；全部缺席或为空时返回 `None`
pub fn average_value<I>(classifications: I) -> Option<f64>
where
    I: IntoIterator<Item = Classification>,
{
    let (sum, count) = classifications
        .into_iter()
        .filter(|c| *c != Classification::NotEvaluated)
        .fold((0i64, 0i64), |(sum, count), c| {
            (sum + i64::from(c.value()), count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(round2(sum as f64 / count as f64))
    }
}

/// 学生逐次评估结果
///
/// `facts` 需包含学生所在各班组评估的全部学生数据，用于计算班组平均。
/// 结果按截止日期排序。
pub fn student_target_entries(student_id: i64, facts: &[EvaluationFact]) -> Vec<StudentTargetEntry> {
    let mut by_group_evaluation: BTreeMap<i64, Vec<&EvaluationFact>> = BTreeMap::new();
    for fact in facts {
        by_group_evaluation
            .entry(fact.group_evaluation_id)
            .or_default()
            .push(fact);
    }

    let mut entries: Vec<StudentTargetEntry> = by_group_evaluation
        .values()
        .filter_map(|rows| {
            let own = rows
                .iter()
                .filter(|f| f.student_id == student_id)
                .max_by_key(|f| f.student_evaluation_id)?;
            let classification = own.classification;
            Some(StudentTargetEntry {
                group_evaluation_id: own.group_evaluation_id,
                due_date: own.due_date,
                activity_code: own.activity_code.clone(),
                learning_target_id: own.learning_target_id,
                learning_target_identifier: own.learning_target_identifier,
                learning_target_name: own.learning_target_name.clone(),
                classification,
                classification_label: classification.report_label().to_string(),
                student_value: (classification != Classification::NotEvaluated)
                    .then(|| classification.value()),
                group_average: average_value(rows.iter().map(|f| f.classification)),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.group_evaluation_id.cmp(&b.group_evaluation_id))
    });
    entries
}

/// 按学习目标统计等级分布
///
/// 每个学习目标都有一行（即使没有任何评估），按目标编号排序；同时返回合计。
pub fn target_rows(
    targets: &[LearningTarget],
    facts: &[EvaluationFact],
) -> (Vec<TargetClassificationRow>, ClassificationCounts) {
    let mut counts_by_target: BTreeMap<i64, ClassificationCounts> = BTreeMap::new();
    for fact in facts {
        counts_by_target
            .entry(fact.learning_target_id)
            .or_default()
            .add(fact.classification);
    }

    let mut sorted: Vec<&LearningTarget> = targets.iter().collect();
    sorted.sort_by_key(|t| (t.identifier, t.id));

    let mut totals = ClassificationCounts::default();
    let rows = sorted
        .into_iter()
        .map(|target| {
            let counts = counts_by_target
                .get(&target.id)
                .copied()
                .unwrap_or_default();
            totals.merge(&counts);
            TargetClassificationRow {
                learning_target_id: target.id,
                identifier: target.identifier,
                name: target.name.clone(),
                abbreviated_name: target.abbreviated_name.clone(),
                counts,
            }
        })
        .collect();

    (rows, totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::groups::entities::GroupLevel;
    use crate::models::learning_targets::entities::Core;
    use chrono::NaiveDate;

    fn fact(
        id: i64,
        student_id: i64,
        group_evaluation_id: i64,
        target: i64,
        day: u32,
        classification: Classification,
    ) -> EvaluationFact {
        EvaluationFact {
            student_evaluation_id: id,
            student_id,
            group_evaluation_id,
            group_id: 1,
            evaluation_id: group_evaluation_id,
            due_date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            activity_code: format!("ACT-{group_evaluation_id}"),
            learning_target_id: target,
            learning_target_identifier: target as i32,
            learning_target_name: format!("Target {target}"),
            learning_target_abbreviated_name: format!("T{target}"),
            core: Core::VerbalLanguage,
            level: GroupLevel::Kinder,
            classification,
        }
    }

    fn target(id: i64, identifier: i32) -> LearningTarget {
        LearningTarget {
            id,
            core: Core::VerbalLanguage,
            level: GroupLevel::Kinder,
            identifier,
            name: format!("Target {id}"),
            abbreviated_name: format!("T{id}"),
        }
    }

    #[test]
    fn test_average_ignores_absent() {
        let avg = average_value([
            Classification::Achieved,
            Classification::NotAchieved,
            Classification::NotEvaluated,
        ]);
        assert_eq!(avg, Some(5.0));
        assert_eq!(average_value([Classification::NotEvaluated]), None);
        assert_eq!(average_value(Vec::new()), None);
    }

    #[test]
    fn test_average_half_rounds_to_even() {
        // 106 / 16 = 6.625
        let mut classifications = vec![Classification::Achieved; 13];
        classifications.extend([Classification::ModeratelyAccomplished; 3]);
        assert_eq!(average_value(classifications), Some(6.62));
    }

    #[test]
    fn test_student_entries_include_group_average() {
        let facts = vec![
            fact(1, 10, 100, 1, 20, Classification::Achieved),
            fact(2, 11, 100, 1, 20, Classification::ModeratelyAccomplished),
            fact(3, 10, 200, 2, 5, Classification::NotEvaluated),
            fact(4, 11, 200, 2, 5, Classification::NotAchieved),
            // 学生未参与的班组评估
            fact(5, 11, 300, 2, 9, Classification::Achieved),
        ];
        let entries = student_target_entries(10, &facts);
        assert_eq!(entries.len(), 2);
        // 按截止日期排序
        assert_eq!(entries[0].group_evaluation_id, 200);
        assert_eq!(entries[0].student_value, None);
        assert_eq!(entries[0].classification_label, "Ausente");
        assert_eq!(entries[0].group_average, Some(3.0));
        assert_eq!(entries[1].student_value, Some(7));
        assert_eq!(entries[1].group_average, Some(6.0));
    }

    #[test]
    fn test_target_rows_cover_every_target() {
        let targets = vec![target(2, 2), target(1, 1)];
        let facts = vec![
            fact(1, 10, 100, 1, 1, Classification::Achieved),
            fact(2, 11, 100, 1, 1, Classification::NotAchieved),
            fact(3, 12, 100, 1, 1, Classification::Achieved),
        ];
        let (rows, totals) = target_rows(&targets, &facts);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].learning_target_id, 1);
        assert_eq!(rows[0].counts.achieved, 2);
        assert_eq!(rows[1].counts.total(), 0);
        assert_eq!(totals.total(), 3);
        assert_eq!(totals.not_achieved, 1);
    }
}
