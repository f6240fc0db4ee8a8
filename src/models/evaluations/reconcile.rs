//! 评估任务编辑时的班组对账
//!
//! 只计算需要新增、删除、保留的班组；实际写库由存储层在单个事务中完成。

use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReconciliationPlan {
    /// 新选中的班组：新建草稿班组评估并为每名成员建学生评估
    pub to_add: BTreeSet<i64>,
    /// 被移除的班组：级联删除其班组评估
    pub to_remove: BTreeSet<i64>,
    /// 保留的班组：仅为后加入的学生补建学生评估
    pub to_keep: BTreeSet<i64>,
}

impl GroupReconciliationPlan {
    pub fn new(before: &BTreeSet<i64>, after: &BTreeSet<i64>) -> Self {
        Self {
            to_add: after.difference(before).copied().collect(),
            to_remove: before.difference(after).copied().collect(),
            to_keep: before.intersection(after).copied().collect(),
        }
    }

    /// 班组集合没有变化
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// 班组当前成员中尚无学生评估的学生，保持成员顺序
///
/// 已离开班组的学生的评估不在此处处理，历史评分保留。
pub fn missing_students(members: &[i64], evaluated: &HashSet<i64>) -> Vec<i64> {
    members
        .iter()
        .filter(|student_id| !evaluated.contains(student_id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_plan_splits_selection() {
        // A=1, B=2, C=3
        let plan = GroupReconciliationPlan::new(&set(&[1, 2]), &set(&[2, 3]));
        assert_eq!(plan.to_add, set(&[3]));
        assert_eq!(plan.to_remove, set(&[1]));
        assert_eq!(plan.to_keep, set(&[2]));
        assert!(!plan.is_noop());
    }

    #[test]
    fn test_unchanged_selection_is_noop() {
        let plan = GroupReconciliationPlan::new(&set(&[4, 5]), &set(&[5, 4]));
        assert!(plan.is_noop());
        assert_eq!(plan.to_keep, set(&[4, 5]));
    }

    #[test]
    fn test_missing_students_only_reports_new_members() {
        let evaluated: HashSet<i64> = [10, 11, 99].into_iter().collect();
        assert_eq!(missing_students(&[10, 11, 12, 13], &evaluated), vec![12, 13]);
        assert!(missing_students(&[10, 11], &evaluated).is_empty());
    }
}
