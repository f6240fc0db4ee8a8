//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{ClassPointError, Result};
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, UpdateStudentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建学生；RUT 需已规范化
    pub async fn create_student_impl(
        &self,
        group_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            group_id: Set(group_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            rut: Set(req.rut),
            list_number: Set(req.list_number),
            birth_date: Set(req.birth_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 按名单序号列出班组学生
    pub async fn list_students_by_group_impl(&self, group_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_asc(Column::ListNumber)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生；修改 group_id 即转班，既有评估不随之移动
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(group_id) = update.group_id {
            model.group_id = Set(group_id);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(rut) = update.rut {
            model.rut = Set(rut);
        }
        if let Some(list_number) = update.list_number {
            model.list_number = Set(list_number);
        }
        if let Some(birth_date) = update.birth_date {
            model.birth_date = Set(Some(birth_date));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新学生失败: {e}")))?;

        self.get_student_by_id_impl(id).await
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 在学校范围内按 RUT 查找学生
    pub async fn find_student_by_rut_impl(
        &self,
        school_id: i64,
        rut: &str,
    ) -> Result<Option<Student>> {
        let group_ids: Vec<i64> = Groups::find()
            .select_only()
            .column(GroupColumn::Id)
            .filter(GroupColumn::SchoolId.eq(school_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学校班组失败: {e}")))?;

        if group_ids.is_empty() {
            return Ok(None);
        }

        let result = Students::find()
            .filter(Column::Rut.eq(rut))
            .filter(Column::GroupId.is_in(group_ids))
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }
}
