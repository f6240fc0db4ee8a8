//! 班组存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{ClassPointError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginationInfo,
    groups::{
        entities::Group,
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
        responses::{GroupListItem, GroupListResponse},
    },
    users::scope::AccessScope,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// 将访问范围转换为班组表上的过滤条件
pub(super) fn group_scope_condition(scope: &AccessScope) -> Condition {
    match scope {
        AccessScope::Global => Condition::all(),
        AccessScope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        AccessScope::Groups {
            school_id,
            group_ids,
        } => Condition::all()
            .add(Column::SchoolId.eq(*school_id))
            .add(Column::Id.is_in(group_ids.clone())),
    }
}

impl SeaOrmStorage {
    /// 创建班组
    pub async fn create_group_impl(&self, school_id: i64, req: CreateGroupRequest) -> Result<Group> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            level: Set(req.level.to_string()),
            responsible_professor_id: Set(req.responsible_professor_id),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建班组失败: {e}")))?;

        Ok(result.into_group())
    }

    pub async fn get_group_by_id_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 分页列出可见范围内的班组，附带学生人数
    pub async fn list_groups_with_pagination_impl(
        &self,
        scope: &AccessScope,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Groups::find().filter(group_scope_condition(scope));

        if !query.include_inactive {
            select = select.filter(Column::Active.eq(true));
        }

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组页数失败: {e}")))?;

        let groups = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组列表失败: {e}")))?;

        let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
        let counts = self.count_students_by_group(&ids).await?;

        let items = groups
            .into_iter()
            .map(|m| {
                let group = m.into_group();
                GroupListItem {
                    level_name: group.level.display_name().to_string(),
                    student_count: counts.get(&group.id).copied().unwrap_or(0),
                    group,
                }
            })
            .collect();

        Ok(GroupListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 统计每个班组的学生人数
    pub(super) async fn count_students_by_group(
        &self,
        group_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        if group_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .select_only()
            .column(StudentColumn::GroupId)
            .column_as(StudentColumn::Id.count(), "student_count")
            .filter(StudentColumn::GroupId.is_in(group_ids.to_vec()))
            .group_by(StudentColumn::GroupId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("统计学生人数失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    /// 更新班组
    pub async fn update_group_impl(
        &self,
        id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        if self.get_group_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(level) = update.level {
            model.level = Set(level.to_string());
        }

        if let Some(professor_id) = update.responsible_professor_id {
            model.responsible_professor_id = Set(Some(professor_id));
        }

        if let Some(active) = update.active {
            model.active = Set(active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新班组失败: {e}")))?;

        self.get_group_by_id_impl(id).await
    }

    /// 删除班组（停用而非物理删除，以保留历史评估）
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Groups::update_many()
            .col_expr(Column::Active, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("删除班组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 教师负责的有效班组 ID
    pub async fn list_group_ids_for_professor_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids = Groups::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::ResponsibleProfessorId.eq(user_id))
            .filter(Column::Active.eq(true))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| {
                ClassPointError::database_operation(format!("查询教师负责班组失败: {e}"))
            })?;

        Ok(ids)
    }
}
