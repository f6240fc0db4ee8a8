//! 轶事记录存储操作

use std::collections::HashMap;

use sea_orm::sea_query::Expr;

use super::SeaOrmStorage;
use crate::entity::anecdotal_records::{ActiveModel, Column, Entity as AnecdotalRecords};
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{ClassPointError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginationInfo,
    anecdotal_records::{
        entities::AnecdotalRecord,
        requests::{
            CreateAnecdotalRecordRequest, StudentsWithRecordsQuery, UpdateAnecdotalRecordRequest,
        },
        responses::{StudentWithRecords, StudentsWithRecordsResponse},
    },
    users::scope::AccessScope,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_anecdotal_record_impl(
        &self,
        created_by: i64,
        req: CreateAnecdotalRecordRequest,
    ) -> Result<AnecdotalRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            activity_id: Set(req.activity_id),
            created_by: Set(Some(created_by)),
            observation_time: Set(req.observation_time),
            observation_source: Set(req.observation_source),
            observed_behaviour: Set(req.observed_behaviour),
            interpretation: Set(req.interpretation),
            comments: Set(None),
            image_url: Set(req.image_url),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建轶事记录失败: {e}")))?;

        Ok(result.into_anecdotal_record())
    }

    /// 只返回有效记录
    pub async fn get_anecdotal_record_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<AnecdotalRecord>> {
        let result = AnecdotalRecords::find_by_id(id)
            .filter(Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询轶事记录失败: {e}")))?;

        Ok(result.map(|m| m.into_anecdotal_record()))
    }

    pub async fn update_anecdotal_record_impl(
        &self,
        id: i64,
        update: UpdateAnecdotalRecordRequest,
    ) -> Result<Option<AnecdotalRecord>> {
        if self.get_anecdotal_record_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(activity_id) = update.activity_id {
            model.activity_id = Set(Some(activity_id));
        }
        if let Some(observation_time) = update.observation_time {
            model.observation_time = Set(observation_time);
        }
        if let Some(source) = update.observation_source {
            model.observation_source = Set(source);
        }
        if let Some(behaviour) = update.observed_behaviour {
            model.observed_behaviour = Set(behaviour);
        }
        if let Some(interpretation) = update.interpretation {
            model.interpretation = Set(interpretation);
        }
        if let Some(comments) = update.comments {
            model.comments = Set(Some(comments));
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新轶事记录失败: {e}")))?;

        self.get_anecdotal_record_by_id_impl(id).await
    }

    /// 软删除
    pub async fn deactivate_anecdotal_record_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = AnecdotalRecords::update_many()
            .col_expr(Column::Active, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("删除轶事记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生的有效记录，最新的在前
    pub async fn list_anecdotal_records_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<AnecdotalRecord>> {
        let rows = AnecdotalRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询轶事记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_anecdotal_record()).collect())
    }

    /// 至少有一条有效记录的学生（按范围过滤）
    pub async fn list_students_with_records_impl(
        &self,
        scope: &AccessScope,
        query: StudentsWithRecordsQuery,
    ) -> Result<StudentsWithRecordsResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let record_counts: HashMap<i64, i64> = AnecdotalRecords::find()
            .select_only()
            .column(Column::StudentId)
            .column_as(Column::Id.count(), "record_count")
            .filter(Column::Active.eq(true))
            .group_by(Column::StudentId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("统计轶事记录失败: {e}")))?
            .into_iter()
            .collect();

        let mut select = Students::find()
            .filter(StudentColumn::Id.is_in(record_counts.keys().copied().collect::<Vec<_>>()));

        match scope {
            AccessScope::Global => {}
            AccessScope::School(school_id) => {
                let group_ids: Vec<i64> = Groups::find()
                    .select_only()
                    .column(GroupColumn::Id)
                    .filter(GroupColumn::SchoolId.eq(*school_id))
                    .into_tuple::<i64>()
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        ClassPointError::database_operation(format!("查询学校班组失败: {e}"))
                    })?;
                select = select.filter(StudentColumn::GroupId.is_in(group_ids));
            }
            AccessScope::Groups { group_ids, .. } => {
                select = select.filter(StudentColumn::GroupId.is_in(group_ids.clone()));
            }
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(StudentColumn::FirstName.contains(&escaped))
                    .add(StudentColumn::LastName.contains(&escaped))
                    .add(StudentColumn::Rut.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(StudentColumn::LastName)
            .order_by_asc(StudentColumn::FirstName)
            .order_by_asc(StudentColumn::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生列表失败: {e}")))?;

        let group_ids: Vec<i64> = students.iter().map(|s| s.group_id).collect();
        let group_names: HashMap<i64, String> = Groups::find()
            .filter(GroupColumn::Id.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let items = students
            .into_iter()
            .map(|m| {
                let student = m.into_student();
                StudentWithRecords {
                    group_name: group_names.get(&student.group_id).cloned().unwrap_or_default(),
                    record_count: record_counts.get(&student.id).copied().unwrap_or(0),
                    student,
                }
            })
            .collect();

        Ok(StudentsWithRecordsResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
