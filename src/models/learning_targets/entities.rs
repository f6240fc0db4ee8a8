use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::groups::entities::GroupLevel;

crate::define_string_enum! {
    /// 课程核心领域
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
    pub enum Core {
        IdentityAndAutonomy => ("identity_and_autonomy", "Identidad y Autonomía"),
        CoexistenceAndCitizenship => ("coexistence_and_citizenship", "Convivencia y Ciudadanía"),
        CorporalityAndMovement => ("corporality_and_movement", "Corporalidad y Movimiento"),
        VerbalLanguage => ("verbal_language", "Lenguaje Verbal"),
        ArtisticLanguages => ("artistic_languages", "Lenguajes Artísticos"),
        NaturalEnvironment => ("natural_environment", "Exploración del Entorno Natural"),
        SocioculturalEnvironment => ("sociocultural_environment", "Comprensión del Entorno Sociocultural"),
        MathematicalThinking => ("mathematical_thinking", "Pensamiento Matemático"),
    }
}

impl Core {
    /// 报表中使用的简称
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Core::IdentityAndAutonomy => "IA",
            Core::CoexistenceAndCitizenship => "CC",
            Core::CorporalityAndMovement => "CM",
            Core::VerbalLanguage => "LV",
            Core::ArtisticLanguages => "LA",
            Core::NaturalEnvironment => "EEN",
            Core::SocioculturalEnvironment => "CES",
            Core::MathematicalThinking => "PM",
        }
    }
}

// 学习目标
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct LearningTarget {
    pub id: i64,
    pub core: Core,
    pub level: GroupLevel,
    pub identifier: i32,
    pub name: String,
    pub abbreviated_name: String,
}

// 教案默认内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct LessonPlan {
    pub beginning: String,
    pub development: String,
    pub conclusion: String,
    pub identity_and_autonomy_target: String,
    pub coexistence_and_citizenship_target: String,
    pub corporality_and_movement_target: String,
    pub materials: String,
}

// 活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning_target.ts")]
pub struct Activity {
    pub id: i64,
    pub learning_target_id: i64,
    pub code: String,
    pub lesson_plan: LessonPlan,
}
