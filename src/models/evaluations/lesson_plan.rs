//! 教案字段解析：班组改写优先，空值回退到活动默认内容

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::LessonPlanOverrides;
use crate::models::learning_targets::entities::LessonPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct LessonPlanField {
    /// 实际生效的内容
    pub value: String,
    /// 活动中的默认内容
    pub original: String,
    pub overridden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ResolvedLessonPlan {
    pub beginning: LessonPlanField,
    pub development: LessonPlanField,
    pub conclusion: LessonPlanField,
    pub identity_and_autonomy_target: LessonPlanField,
    pub coexistence_and_citizenship_target: LessonPlanField,
    pub corporality_and_movement_target: LessonPlanField,
    pub materials: LessonPlanField,
}

fn resolve_field(override_value: &Option<String>, default_value: &str) -> LessonPlanField {
    match override_value.as_deref() {
        Some(value) if !value.is_empty() => LessonPlanField {
            value: value.to_string(),
            original: default_value.to_string(),
            overridden: true,
        },
        _ => LessonPlanField {
            value: default_value.to_string(),
            original: default_value.to_string(),
            overridden: false,
        },
    }
}

impl LessonPlanOverrides {
    pub fn resolve(&self, defaults: &LessonPlan) -> ResolvedLessonPlan {
        ResolvedLessonPlan {
            beginning: resolve_field(&self.beginning, &defaults.beginning),
            development: resolve_field(&self.development, &defaults.development),
            conclusion: resolve_field(&self.conclusion, &defaults.conclusion),
            identity_and_autonomy_target: resolve_field(
                &self.identity_and_autonomy_target,
                &defaults.identity_and_autonomy_target,
            ),
            coexistence_and_citizenship_target: resolve_field(
                &self.coexistence_and_citizenship_target,
                &defaults.coexistence_and_citizenship_target,
            ),
            corporality_and_movement_target: resolve_field(
                &self.corporality_and_movement_target,
                &defaults.corporality_and_movement_target,
            ),
            materials: resolve_field(&self.materials, &defaults.materials),
        }
    }

    /// 去掉开始/发展/结束三个环节的改写（用户未开启教学经验选项时）
    pub fn without_experience_fields(self) -> Self {
        Self {
            beginning: None,
            development: None,
            conclusion: None,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> LessonPlan {
        LessonPlan {
            beginning: "Saludo".to_string(),
            development: "Juego".to_string(),
            conclusion: "Cierre".to_string(),
            materials: "Papel".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_wins_when_present() {
        let overrides = LessonPlanOverrides {
            beginning: Some("Canción".to_string()),
            ..Default::default()
        };
        let plan = overrides.resolve(&defaults());
        assert_eq!(plan.beginning.value, "Canción");
        assert_eq!(plan.beginning.original, "Saludo");
        assert!(plan.beginning.overridden);
        assert_eq!(plan.development.value, "Juego");
        assert!(!plan.development.overridden);
    }

    #[test]
    fn test_empty_override_falls_back() {
        let overrides = LessonPlanOverrides {
            materials: Some(String::new()),
            ..Default::default()
        };
        let plan = overrides.resolve(&defaults());
        assert_eq!(plan.materials.value, "Papel");
        assert!(!plan.materials.overridden);
    }

    #[test]
    fn test_experience_fields_are_stripped() {
        let overrides = LessonPlanOverrides {
            beginning: Some("a".to_string()),
            conclusion: Some("b".to_string()),
            materials: Some("c".to_string()),
            ..Default::default()
        }
        .without_experience_fields();
        assert_eq!(overrides.beginning, None);
        assert_eq!(overrides.conclusion, None);
        assert_eq!(overrides.materials.as_deref(), Some("c"));
    }
}
