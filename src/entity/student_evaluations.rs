//! 学生评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_evaluation_id: i64,
    pub student_id: i64,
    pub classification: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub annotations: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group_evaluations::Entity",
        from = "Column::GroupEvaluationId",
        to = "super::group_evaluations::Column::Id"
    )]
    GroupEvaluation,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::student_evaluation_changes::Entity")]
    Changes,
}

impl Related<super::group_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupEvaluation.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::student_evaluation_changes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Changes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_evaluation(self) -> crate::models::evaluations::entities::StudentEvaluation {
        use crate::models::common::timestamp_to_datetime;
        use crate::models::evaluations::entities::{Classification, StudentEvaluation};

        StudentEvaluation {
            id: self.id,
            group_evaluation_id: self.group_evaluation_id,
            student_id: self.student_id,
            classification: Classification::from_value(self.classification).unwrap_or_default(),
            annotations: self.annotations,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
