//! 班组评估实体
//!
//! 七个可空文本列为班组对活动教案的改写。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "group_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub group_id: i64,
    pub status: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub beginning: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub development: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub conclusion: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub identity_and_autonomy_target: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub coexistence_and_citizenship_target: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub corporality_and_movement_target: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub materials: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::general_evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::general_evaluations::Column::Id"
    )]
    GeneralEvaluation,
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
    #[sea_orm(has_many = "super::student_evaluations::Entity")]
    StudentEvaluations,
}

impl Related<super::general_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralEvaluation.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::student_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_group_evaluation(self) -> crate::models::evaluations::entities::GroupEvaluation {
        use crate::models::common::timestamp_to_datetime;
        use crate::models::evaluations::entities::{
            GroupEvaluation, GroupEvaluationStatus, LessonPlanOverrides,
        };

        GroupEvaluation {
            id: self.id,
            evaluation_id: self.evaluation_id,
            group_id: self.group_id,
            status: GroupEvaluationStatus::from_value(self.status)
                .unwrap_or(GroupEvaluationStatus::Draft),
            overrides: LessonPlanOverrides {
                beginning: self.beginning,
                development: self.development,
                conclusion: self.conclusion,
                identity_and_autonomy_target: self.identity_and_autonomy_target,
                coexistence_and_citizenship_target: self.coexistence_and_citizenship_target,
                corporality_and_movement_target: self.corporality_and_movement_target,
                materials: self.materials,
            },
            active: self.active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
