//! 访问范围
//!
//! 查询构造时显式传入的可见范围：管理员看全部，协调员看本校，
//! 教师只看自己负责的班组。

use super::entities::{User, UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    /// 不限制（无所属学校的管理员）
    Global,
    /// 整个学校
    School(i64),
    /// 指定学校内的若干班组
    Groups { school_id: i64, group_ids: Vec<i64> },
}

impl AccessScope {
    /// 根据用户角色与其负责的班组构造访问范围
    ///
    /// 教师与协调员必须隶属某个学校，否则返回 `None`。
    pub fn for_user(user: &User, assigned_group_ids: Vec<i64>) -> Option<Self> {
        match (&user.role, user.school_id) {
            (UserRole::Admin, None) => Some(AccessScope::Global),
            (UserRole::Admin, Some(school_id)) => Some(AccessScope::School(school_id)),
            (role, Some(school_id)) if role.is_coordinator() => {
                Some(AccessScope::School(school_id))
            }
            (UserRole::Professor, Some(school_id)) => Some(AccessScope::Groups {
                school_id,
                group_ids: assigned_group_ids,
            }),
            _ => None,
        }
    }

    pub fn school_id(&self) -> Option<i64> {
        match self {
            AccessScope::Global => None,
            AccessScope::School(school_id) => Some(*school_id),
            AccessScope::Groups { school_id, .. } => Some(*school_id),
        }
    }

    /// 若范围限定了班组，返回班组 ID 列表
    pub fn group_ids(&self) -> Option<&[i64]> {
        match self {
            AccessScope::Groups { group_ids, .. } => Some(group_ids),
            _ => None,
        }
    }

    /// 判断某个班组是否在可见范围内
    pub fn allows_group(&self, group_id: i64, group_school_id: i64) -> bool {
        match self {
            AccessScope::Global => true,
            AccessScope::School(school_id) => *school_id == group_school_id,
            AccessScope::Groups {
                school_id,
                group_ids,
            } => *school_id == group_school_id && group_ids.contains(&group_id),
        }
    }

    pub fn allows_school(&self, school_id: i64) -> bool {
        self.school_id().is_none_or(|own| own == school_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(role: UserRole, school_id: Option<i64>) -> User {
        User {
            id: 7,
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            role,
            status: UserStatus::Active,
            school_id,
            display_name: None,
            professor_experience_enabled: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_professor_sees_only_assigned_groups() {
        let scope = AccessScope::for_user(&user(UserRole::Professor, Some(1)), vec![10, 11])
            .expect("professor with school");
        assert!(scope.allows_group(10, 1));
        assert!(!scope.allows_group(12, 1));
        assert!(!scope.allows_group(10, 2));
        assert_eq!(scope.group_ids(), Some(&[10, 11][..]));
    }

    #[test]
    fn test_coordinator_sees_whole_school() {
        let scope = AccessScope::for_user(&user(UserRole::GeneralCoordinator, Some(3)), vec![])
            .expect("coordinator with school");
        assert_eq!(scope, AccessScope::School(3));
        assert!(scope.allows_group(99, 3));
        assert!(!scope.allows_group(99, 4));
    }

    #[test]
    fn test_admin_without_school_is_global() {
        let scope = AccessScope::for_user(&user(UserRole::Admin, None), vec![]).unwrap();
        assert_eq!(scope, AccessScope::Global);
        assert!(scope.allows_school(42));
        assert_eq!(scope.school_id(), None);
    }

    #[test]
    fn test_staff_without_school_has_no_scope() {
        assert!(AccessScope::for_user(&user(UserRole::Professor, None), vec![1]).is_none());
        assert!(AccessScope::for_user(&user(UserRole::Coordinator, None), vec![]).is_none());
    }
}
