//! 学习目标实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "learning_targets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub core: String,
    pub level: String,
    pub identifier: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub abbreviated_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activities::Entity")]
    Activities,
}

impl Related<super::activities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_learning_target(self) -> crate::models::learning_targets::entities::LearningTarget {
        use crate::models::groups::entities::GroupLevel;
        use crate::models::learning_targets::entities::{Core, LearningTarget};

        LearningTarget {
            id: self.id,
            core: self.core.parse::<Core>().unwrap_or(Core::VerbalLanguage),
            level: GroupLevel::from_stored(&self.level),
            identifier: self.identifier,
            name: self.name,
            abbreviated_name: self.abbreviated_name,
        }
    }
}
