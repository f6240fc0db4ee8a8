//! 活动实体（含教案默认内容）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub learning_target_id: i64,
    #[sea_orm(unique)]
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub beginning: String,
    #[sea_orm(column_type = "Text")]
    pub development: String,
    #[sea_orm(column_type = "Text")]
    pub conclusion: String,
    #[sea_orm(column_type = "Text")]
    pub identity_and_autonomy_target: String,
    #[sea_orm(column_type = "Text")]
    pub coexistence_and_citizenship_target: String,
    #[sea_orm(column_type = "Text")]
    pub corporality_and_movement_target: String,
    #[sea_orm(column_type = "Text")]
    pub materials: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::learning_targets::Entity",
        from = "Column::LearningTargetId",
        to = "super::learning_targets::Column::Id"
    )]
    LearningTarget,
    #[sea_orm(has_many = "super::general_evaluations::Entity")]
    GeneralEvaluations,
}

impl Related<super::learning_targets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LearningTarget.def()
    }
}

impl Related<super::general_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_activity(self) -> crate::models::learning_targets::entities::Activity {
        use crate::models::learning_targets::entities::{Activity, LessonPlan};

        Activity {
            id: self.id,
            learning_target_id: self.learning_target_id,
            code: self.code,
            lesson_plan: LessonPlan {
                beginning: self.beginning,
                development: self.development,
                conclusion: self.conclusion,
                identity_and_autonomy_target: self.identity_and_autonomy_target,
                coexistence_and_citizenship_target: self.coexistence_and_citizenship_target,
                corporality_and_movement_target: self.corporality_and_movement_target,
                materials: self.materials,
            },
        }
    }
}
