//! 等级变更检测
//!
//! 批量评分提交前先对 `{学生评估ID → 等级}` 拍快照，提交后逐 ID 对比，
//! 为每个等级真正发生变化的评估生成一条变更记录。

use std::collections::HashMap;

use super::entities::Classification;

pub type ClassificationSnapshot = HashMap<i64, Classification>;

/// 一条待写入的等级变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationChange {
    pub student_evaluation_id: i64,
    pub from: Classification,
    pub to: Classification,
}

pub fn snapshot<I>(rows: I) -> ClassificationSnapshot
where
    I: IntoIterator<Item = (i64, Classification)>,
{
    rows.into_iter().collect()
}

/// 对比提交前快照与提交后的行
///
/// 快照中不存在的 ID（本次新建）不产生记录；快照中有但提交后缺失的 ID 被忽略。
/// 输出顺序与 `after` 的顺序一致。
pub fn diff_classifications<I>(
    before: &ClassificationSnapshot,
    after: I,
) -> Vec<ClassificationChange>
where
    I: IntoIterator<Item = (i64, Classification)>,
{
    after
        .into_iter()
        .filter_map(|(id, to)| {
            let from = *before.get(&id)?;
            (from != to).then_some(ClassificationChange {
                student_evaluation_id: id,
                from,
                to,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Classification::*;

    #[test]
    fn test_only_strict_differences_are_recorded() {
        let before = snapshot([(1, NotEvaluated), (2, NotAchieved), (3, Achieved)]);
        let changes = diff_classifications(
            &before,
            [(1, ModeratelyAccomplished), (2, NotAchieved), (3, NotAchieved)],
        );
        assert_eq!(
            changes,
            vec![
                ClassificationChange {
                    student_evaluation_id: 1,
                    from: NotEvaluated,
                    to: ModeratelyAccomplished,
                },
                ClassificationChange {
                    student_evaluation_id: 3,
                    from: Achieved,
                    to: NotAchieved,
                },
            ]
        );
    }

    #[test]
    fn test_new_rows_are_never_diffed() {
        let before = snapshot([(1, NotEvaluated)]);
        let changes = diff_classifications(&before, [(1, NotEvaluated), (2, Achieved)]);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_deleted_rows_are_ignored() {
        let before = snapshot([(1, NotEvaluated), (2, NotAchieved)]);
        let changes = diff_classifications(&before, [(2, Achieved)]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].student_evaluation_id, 2);
    }

    #[test]
    fn test_comparison_is_by_id_not_position() {
        let before = snapshot([(1, Achieved), (2, NotAchieved)]);
        let changes = diff_classifications(&before, [(2, NotAchieved), (1, Achieved)]);
        assert!(changes.is_empty());
    }
}
