//! 轶事记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "anecdotal_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub activity_id: Option<i64>,
    pub created_by: Option<i64>,
    pub observation_time: i32,
    pub observation_source: String,
    #[sea_orm(column_type = "Text")]
    pub observed_behaviour: String,
    #[sea_orm(column_type = "Text")]
    pub interpretation: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::activities::Entity",
        from = "Column::ActivityId",
        to = "super::activities::Column::Id"
    )]
    Activity,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Author,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_anecdotal_record(self) -> crate::models::anecdotal_records::entities::AnecdotalRecord {
        use crate::models::common::timestamp_to_datetime;

        crate::models::anecdotal_records::entities::AnecdotalRecord {
            id: self.id,
            student_id: self.student_id,
            activity_id: self.activity_id,
            created_by: self.created_by,
            observation_time: self.observation_time,
            observation_source: self.observation_source,
            observed_behaviour: self.observed_behaviour,
            interpretation: self.interpretation,
            comments: self.comments.unwrap_or_default(),
            image_url: self.image_url,
            active: self.active,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
