//! 等级变更记录实体（只追加）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_evaluation_changes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_evaluation_id: i64,
    pub from_classification: i32,
    pub to_classification: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_evaluations::Entity",
        from = "Column::StudentEvaluationId",
        to = "super::student_evaluations::Column::Id"
    )]
    StudentEvaluation,
}

impl Related<super::student_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentEvaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_change(self) -> crate::models::evaluations::entities::StudentEvaluationChange {
        use crate::models::common::timestamp_to_datetime;
        use crate::models::evaluations::entities::{Classification, StudentEvaluationChange};

        StudentEvaluationChange {
            id: self.id,
            student_evaluation_id: self.student_evaluation_id,
            from_classification: Classification::from_value(self.from_classification)
                .unwrap_or_default(),
            to_classification: Classification::from_value(self.to_classification)
                .unwrap_or_default(),
            created_at: timestamp_to_datetime(self.created_at),
        }
    }
}
