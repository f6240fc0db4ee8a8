//! 学习目标与活动目录

use super::SeaOrmStorage;
use crate::entity::activities::{
    ActiveModel as ActivityActiveModel, Column as ActivityColumn, Entity as Activities,
};
use crate::entity::learning_targets::{
    ActiveModel as TargetActiveModel, Column as TargetColumn, Entity as LearningTargets,
};
use crate::errors::{ClassPointError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginatedResponse, PaginationInfo,
    learning_targets::{
        entities::{Activity, LearningTarget},
        requests::{
            ActivityListQuery, CreateActivityRequest, CreateLearningTargetRequest,
            LearningTargetListParams,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_learning_target_impl(
        &self,
        req: CreateLearningTargetRequest,
    ) -> Result<LearningTarget> {
        let model = TargetActiveModel {
            core: Set(req.core.to_string()),
            level: Set(req.level.to_string()),
            identifier: Set(req.identifier),
            name: Set(req.name),
            abbreviated_name: Set(req.abbreviated_name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建学习目标失败: {e}")))?;

        Ok(result.into_learning_target())
    }

    pub async fn get_learning_target_by_id_impl(&self, id: i64) -> Result<Option<LearningTarget>> {
        let result = LearningTargets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学习目标失败: {e}")))?;

        Ok(result.map(|m| m.into_learning_target()))
    }

    /// 按核心领域与等级筛选，按编号排序
    pub async fn list_learning_targets_impl(
        &self,
        params: LearningTargetListParams,
    ) -> Result<Vec<LearningTarget>> {
        let mut select = LearningTargets::find();

        if let Some(core) = params.core {
            select = select.filter(TargetColumn::Core.eq(core.to_string()));
        }
        if let Some(level) = params.level {
            select = select.filter(TargetColumn::Level.eq(level.to_string()));
        }

        let targets = select
            .order_by_asc(TargetColumn::Identifier)
            .order_by_asc(TargetColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                ClassPointError::database_operation(format!("查询学习目标列表失败: {e}"))
            })?;

        Ok(targets.into_iter().map(|m| m.into_learning_target()).collect())
    }

    pub async fn create_activity_impl(&self, req: CreateActivityRequest) -> Result<Activity> {
        let plan = req.lesson_plan;
        let model = ActivityActiveModel {
            learning_target_id: Set(req.learning_target_id),
            code: Set(req.code),
            beginning: Set(plan.beginning),
            development: Set(plan.development),
            conclusion: Set(plan.conclusion),
            identity_and_autonomy_target: Set(plan.identity_and_autonomy_target),
            coexistence_and_citizenship_target: Set(plan.coexistence_and_citizenship_target),
            corporality_and_movement_target: Set(plan.corporality_and_movement_target),
            materials: Set(plan.materials),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_activity())
    }

    pub async fn get_activity_by_id_impl(&self, id: i64) -> Result<Option<Activity>> {
        let result = Activities::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_activity()))
    }

    pub async fn list_activities_with_pagination_impl(
        &self,
        query: ActivityListQuery,
    ) -> Result<PaginatedResponse<Activity>> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Activities::find();

        if let Some(target_id) = query.learning_target_id {
            select = select.filter(ActivityColumn::LearningTargetId.eq(target_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(ActivityColumn::Code.contains(&escaped));
        }

        let paginator = select
            .order_by_asc(ActivityColumn::Code)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动页数失败: {e}")))?;

        let activities = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: activities.into_iter().map(|m| m.into_activity()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
