use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教职工角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Professor,          // 教师
    Coordinator,        // 教学协调员
    GeneralCoordinator, // 总协调员
    Admin,              // 管理员
}

impl UserRole {
    pub const PROFESSOR: &'static str = "professor";
    pub const COORDINATOR: &'static str = "coordinator";
    pub const GENERAL_COORDINATOR: &'static str = "general_coordinator";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn professor_roles() -> &'static [&'static UserRole] {
        &[&Self::Professor]
    }
    pub fn coordinator_roles() -> &'static [&'static UserRole] {
        &[&Self::Coordinator, &Self::GeneralCoordinator]
    }
    /// 可以查看班组与轶事记录的教职工
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Professor, &Self::Coordinator, &Self::GeneralCoordinator]
    }
    /// 可以创建评估任务的角色
    pub fn evaluation_creator_roles() -> &'static [&'static UserRole] {
        &[&Self::Professor, &Self::Coordinator, &Self::GeneralCoordinator]
    }
    /// 可以删除评估任务的角色
    pub fn evaluation_admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Coordinator, &Self::GeneralCoordinator]
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, UserRole::Coordinator | UserRole::GeneralCoordinator)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: professor, coordinator, general_coordinator, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
            UserRole::Coordinator => write!(f, "{}", UserRole::COORDINATOR),
            UserRole::GeneralCoordinator => write!(f, "{}", UserRole::GENERAL_COORDINATOR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            UserRole::COORDINATOR => Ok(UserRole::Coordinator),
            UserRole::GENERAL_COORDINATOR => Ok(UserRole::GeneralCoordinator),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 教职工实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub school_id: Option<i64>,
    pub display_name: Option<String>,
    /// 允许教师改写教案的开始/发展/结束环节
    pub professor_experience_enabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(
            "general_coordinator".parse::<UserRole>(),
            Ok(UserRole::GeneralCoordinator)
        );
        assert!("teacher".parse::<UserRole>().is_err());
        assert_eq!(UserRole::GeneralCoordinator.to_string(), "general_coordinator");
    }

    #[test]
    fn test_role_deserialize_message() {
        let err = serde_json::from_str::<UserRole>("\"janitor\"").unwrap_err();
        assert!(err.to_string().contains("janitor"));
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::Coordinator.is_coordinator());
        assert!(!UserRole::Admin.is_coordinator());
        assert!(!UserRole::staff_roles().contains(&&UserRole::Admin));
        assert!(UserRole::evaluation_admin_roles().contains(&&UserRole::Admin));
    }
}
