//! 学校存储操作

use super::SeaOrmStorage;
use crate::entity::schools::{ActiveModel, Column, Entity as Schools};
use crate::errors::{ClassPointError, Result};
use crate::models::schools::entities::School;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建学校
    pub async fn create_school_impl(&self, name: String) -> Result<School> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建学校失败: {e}")))?;

        Ok(result.into_school())
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<Option<School>> {
        let result = Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学校失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn list_schools_impl(&self) -> Result<Vec<School>> {
        let schools = Schools::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学校列表失败: {e}")))?;

        Ok(schools.into_iter().map(|m| m.into_school()).collect())
    }
}
