//! 评估任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "general_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub activity_id: i64,
    pub due_date: chrono::NaiveDate,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::activities::Entity",
        from = "Column::ActivityId",
        to = "super::activities::Column::Id"
    )]
    Activity,
    #[sea_orm(has_many = "super::group_evaluations::Entity")]
    GroupEvaluations,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::group_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_general_evaluation(self) -> crate::models::evaluations::entities::GeneralEvaluation {
        use crate::models::common::timestamp_to_datetime;

        crate::models::evaluations::entities::GeneralEvaluation {
            id: self.id,
            school_id: self.school_id,
            activity_id: self.activity_id,
            due_date: self.due_date,
            active: self.active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
