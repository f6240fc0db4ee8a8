//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub list_number: i32,
    pub birth_date: Option<chrono::NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
    #[sea_orm(has_many = "super::student_evaluations::Entity")]
    StudentEvaluations,
    #[sea_orm(has_many = "super::anecdotal_records::Entity")]
    AnecdotalRecords,
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

impl Related<super::anecdotal_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnecdotalRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::common::timestamp_to_datetime;

        crate::models::students::entities::Student {
            id: self.id,
            group_id: self.group_id,
            first_name: self.first_name,
            last_name: self.last_name,
            rut: self.rut,
            list_number: self.list_number,
            birth_date: self.birth_date,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
