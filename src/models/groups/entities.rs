use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

crate::define_string_enum! {
    /// 班组等级（学前教育阶段）
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
    pub enum GroupLevel {
        InfantNursery => ("infant_nursery", "Sala Cuna Menor"),
        ToddlerNursery => ("toddler_nursery", "Sala Cuna Mayor"),
        LowerMedium => ("lower_medium", "Medio Menor"),
        UpperMedium => ("upper_medium", "Medio Mayor"),
        PreKinder => ("pre_kinder", "Pre Kinder"),
        Kinder => ("kinder", "Kinder"),
    }
}

impl GroupLevel {
    /// 解析库中存储的等级；无法识别时记录告警并按 Kinder 处理
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("无法识别的班组等级 {:?}，按 kinder 处理", value);
            GroupLevel::Kinder
        })
    }
}

// 班组实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct Group {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub level: GroupLevel,
    pub responsible_professor_id: Option<i64>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_level_parses_known_values() {
        assert_eq!(GroupLevel::from_stored("pre_kinder"), GroupLevel::PreKinder);
        assert_eq!(GroupLevel::from_stored("infant_nursery"), GroupLevel::InfantNursery);
    }

    #[test]
    fn test_unknown_stored_level_falls_back_to_kinder() {
        assert_eq!(GroupLevel::from_stored("segundo_basico"), GroupLevel::Kinder);
        assert_eq!(GroupLevel::from_stored(""), GroupLevel::Kinder);
    }
}
