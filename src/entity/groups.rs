//! 班组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "school_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub level: String,
    pub responsible_professor_id: Option<i64>,
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
        belongs_to = "super::users::Entity",
        from = "Column::ResponsibleProfessorId",
        to = "super::users::Column::Id"
    )]
    ResponsibleProfessor,
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::group_evaluations::Entity")]
    GroupEvaluations,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResponsibleProfessor.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::group_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_group(self) -> crate::models::groups::entities::Group {
        use crate::models::common::timestamp_to_datetime;
        use crate::models::groups::entities::{Group, GroupLevel};

        Group {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            level: GroupLevel::from_stored(&self.level),
            responsible_professor_id: self.responsible_professor_id,
            active: self.active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
