//! 班组评估存储操作

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use tracing::debug;

use super::SeaOrmStorage;
use super::evaluations::delete_group_evaluations_in;
use crate::entity::activities::{Column as ActivityColumn, Entity as Activities};
use crate::entity::general_evaluations::{
    Column as EvaluationColumn, Entity as GeneralEvaluations,
};
use crate::entity::group_evaluations::{ActiveModel, Column, Entity as GroupEvaluations};
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::learning_targets::{Column as TargetColumn, Entity as LearningTargets};
use crate::entity::student_evaluation_changes::{
    ActiveModel as ChangeActiveModel, Column as ChangeColumn, Entity as StudentEvaluationChanges,
};
use crate::entity::student_evaluations::{
    ActiveModel as StudentEvaluationActiveModel, Column as StudentEvaluationColumn,
    Entity as StudentEvaluations,
};
use crate::errors::{ClassPointError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginationInfo,
    evaluations::{
        changes::{diff_classifications, snapshot},
        entities::{
            Classification, GroupEvaluation, GroupEvaluationStatus, LessonPlanOverrides,
            StudentEvaluation, StudentEvaluationChange,
        },
        requests::{GradeGroupEvaluationRequest, GroupEvaluationListQuery},
        responses::{GradingOutcome, GroupEvaluationListItem, GroupEvaluationListResponse},
    },
    groups::entities::GroupLevel,
    users::scope::AccessScope,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 改写字段：`Some("")` 清除，`Some(v)` 覆盖，`None` 不变
fn override_value(value: Option<String>) -> ActiveValue<Option<String>> {
    match value {
        None => ActiveValue::NotSet,
        Some(text) if text.trim().is_empty() => Set(None),
        Some(text) => Set(Some(text)),
    }
}

fn apply_overrides(model: &mut ActiveModel, overrides: LessonPlanOverrides) {
    model.beginning = override_value(overrides.beginning);
    model.development = override_value(overrides.development);
    model.conclusion = override_value(overrides.conclusion);
    model.identity_and_autonomy_target = override_value(overrides.identity_and_autonomy_target);
    model.coexistence_and_citizenship_target =
        override_value(overrides.coexistence_and_citizenship_target);
    model.corporality_and_movement_target =
        override_value(overrides.corporality_and_movement_target);
    model.materials = override_value(overrides.materials);
}

fn classification_of(value: i32) -> Classification {
    Classification::from_value(value).unwrap_or_default()
}

impl SeaOrmStorage {
    pub async fn list_group_evaluations_by_evaluation_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<GroupEvaluation>> {
        let rows = GroupEvaluations::find()
            .filter(Column::EvaluationId.eq(evaluation_id))
            .filter(Column::Active.eq(true))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组评估失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_group_evaluation()).collect())
    }

    pub async fn get_group_evaluation_by_id_impl(&self, id: i64) -> Result<Option<GroupEvaluation>> {
        let result = GroupEvaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组评估失败: {e}")))?;

        Ok(result.map(|m| m.into_group_evaluation()))
    }

    /// 分页列出可见范围内的班组评估
    pub async fn list_group_evaluations_with_pagination_impl(
        &self,
        scope: &AccessScope,
        query: GroupEvaluationListQuery,
    ) -> Result<GroupEvaluationListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = GroupEvaluations::find().filter(Column::Active.eq(true));

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
                select = select.filter(Column::GroupId.is_in(group_ids));
            }
            AccessScope::Groups { group_ids, .. } => {
                select = select.filter(Column::GroupId.is_in(group_ids.clone()));
            }
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.value()));
        }

        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            ClassPointError::database_operation(format!("查询班组评估总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            ClassPointError::database_operation(format!("查询班组评估页数失败: {e}"))
        })?;

        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            ClassPointError::database_operation(format!("查询班组评估列表失败: {e}"))
        })?;

        let group_evaluations: Vec<GroupEvaluation> =
            rows.into_iter().map(|m| m.into_group_evaluation()).collect();

        let items = self.build_group_evaluation_items(group_evaluations).await?;

        Ok(GroupEvaluationListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    async fn build_group_evaluation_items(
        &self,
        group_evaluations: Vec<GroupEvaluation>,
    ) -> Result<Vec<GroupEvaluationListItem>> {
        if group_evaluations.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids: Vec<i64> = group_evaluations.iter().map(|ge| ge.group_id).collect();
        let evaluation_ids: Vec<i64> = group_evaluations.iter().map(|ge| ge.evaluation_id).collect();

        let groups: HashMap<i64, (String, String)> = Groups::find()
            .filter(GroupColumn::Id.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.name, m.level)))
            .collect();

        let evaluations: HashMap<i64, (i64, chrono::NaiveDate)> = GeneralEvaluations::find()
            .filter(EvaluationColumn::Id.is_in(evaluation_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询评估任务失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.activity_id, m.due_date)))
            .collect();

        let activity_ids: Vec<i64> = evaluations.values().map(|(activity, _)| *activity).collect();
        let activities: HashMap<i64, (String, i64)> = Activities::find()
            .filter(ActivityColumn::Id.is_in(activity_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.code, m.learning_target_id)))
            .collect();

        let target_ids: Vec<i64> = activities.values().map(|(_, target)| *target).collect();
        let targets: HashMap<i64, String> = LearningTargets::find()
            .filter(TargetColumn::Id.is_in(target_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学习目标失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let items = group_evaluations
            .into_iter()
            .map(|group_evaluation| {
                let (group_name, level) = groups
                    .get(&group_evaluation.group_id)
                    .cloned()
                    .unwrap_or_default();
                let (activity_id, due_date) = evaluations
                    .get(&group_evaluation.evaluation_id)
                    .copied()
                    .unwrap_or_default();
                let (activity_code, target_id) =
                    activities.get(&activity_id).cloned().unwrap_or_default();
                let learning_target_name = targets.get(&target_id).cloned().unwrap_or_default();

                GroupEvaluationListItem {
                    status_label: group_evaluation.status.display_name().to_string(),
                    group_evaluation,
                    group_name,
                    level: GroupLevel::from_stored(&level),
                    activity_code,
                    learning_target_name,
                    due_date,
                }
            })
            .collect();

        Ok(items)
    }

    pub async fn list_student_evaluations_impl(
        &self,
        group_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluation>> {
        let rows = StudentEvaluations::find()
            .filter(StudentEvaluationColumn::GroupEvaluationId.eq(group_evaluation_id))
            .order_by_asc(StudentEvaluationColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student_evaluation()).collect())
    }

    /// 批量评分
    ///
    /// 提交前对本班组评估的全部等级拍快照，写入后逐条对比，
    /// 等级真正变化的学生评估各追加一条变更记录。
    pub async fn grade_group_evaluation_impl(
        &self,
        id: i64,
        grading: GradeGroupEvaluationRequest,
    ) -> Result<GradingOutcome> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("开启事务失败: {e}")))?;

        if GroupEvaluations::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组评估失败: {e}")))?
            .is_none()
        {
            return Err(ClassPointError::not_found(format!("班组评估不存在: {id}")));
        }

        let current = StudentEvaluations::find()
            .filter(StudentEvaluationColumn::GroupEvaluationId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

        let before = snapshot(
            current
                .iter()
                .map(|row| (row.id, classification_of(row.classification))),
        );

        if let Some(foreign) = grading
            .student_evaluations
            .iter()
            .find(|input| !before.contains_key(&input.id))
        {
            return Err(ClassPointError::validation(format!(
                "学生评估 {} 不属于班组评估 {id}",
                foreign.id
            )));
        }

        let mut outcome = GradingOutcome::default();

        for input in grading.student_evaluations {
            let annotations = input
                .annotations
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty());

            StudentEvaluationActiveModel {
                id: Set(input.id),
                classification: Set(input.classification.value()),
                annotations: Set(annotations),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新学生评估失败: {e}")))?;

            outcome.updated += 1;
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(overrides) = grading.overrides {
            apply_overrides(&mut model, overrides);
        }
        model
            .update(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新班组评估失败: {e}")))?;

        let after = StudentEvaluations::find()
            .filter(StudentEvaluationColumn::GroupEvaluationId.eq(id))
            .order_by_asc(StudentEvaluationColumn::Id)
            .all(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

        let changes = diff_classifications(
            &before,
            after
                .iter()
                .map(|row| (row.id, classification_of(row.classification))),
        );

        if !changes.is_empty() {
            outcome.changes_recorded = changes.len() as i64;
            let models = changes.into_iter().map(|change| ChangeActiveModel {
                student_evaluation_id: Set(change.student_evaluation_id),
                from_classification: Set(change.from.value()),
                to_classification: Set(change.to.value()),
                created_at: Set(now),
                ..Default::default()
            });

            StudentEvaluationChanges::insert_many(models)
                .exec(&txn)
                .await
                .map_err(|e| {
                    ClassPointError::database_operation(format!("写入等级变更记录失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "班组评估 {} 评分完成: 更新 {} 条, 变更 {} 条",
            id, outcome.updated, outcome.changes_recorded
        );

        Ok(outcome)
    }

    /// 草稿 → 已提交；条件更新保证只转换一次
    pub async fn finalize_group_evaluation_impl(&self, id: i64) -> Result<GroupEvaluation> {
        let now = chrono::Utc::now().timestamp();

        let result = GroupEvaluations::update_many()
            .col_expr(Column::Status, Expr::value(GroupEvaluationStatus::Sent.value()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(GroupEvaluationStatus::Draft.value()))
            .exec(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交班组评估失败: {e}")))?;

        let current = self
            .get_group_evaluation_by_id_impl(id)
            .await?
            .ok_or_else(|| ClassPointError::not_found(format!("班组评估不存在: {id}")))?;

        if result.rows_affected == 0 {
            return Err(ClassPointError::invalid_transition(format!(
                "班组评估 {id} 已是{}状态",
                current.status.display_name()
            )));
        }

        Ok(current)
    }

    pub async fn delete_group_evaluation_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = delete_group_evaluations_in(&txn, &[id]).await?;

        txn.commit()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted > 0)
    }

    /// 学生在某班组评估中的评估（有多条时取最新）
    pub async fn get_student_evaluation_impl(
        &self,
        group_evaluation_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentEvaluation>> {
        let result = StudentEvaluations::find()
            .filter(StudentEvaluationColumn::GroupEvaluationId.eq(group_evaluation_id))
            .filter(StudentEvaluationColumn::StudentId.eq(student_id))
            .order_by_desc(StudentEvaluationColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

        Ok(result.map(|m| m.into_student_evaluation()))
    }

    pub async fn list_student_evaluation_changes_impl(
        &self,
        student_evaluation_id: i64,
    ) -> Result<Vec<StudentEvaluationChange>> {
        let rows = StudentEvaluationChanges::find()
            .filter(ChangeColumn::StudentEvaluationId.eq(student_evaluation_id))
            .order_by_asc(ChangeColumn::CreatedAt)
            .order_by_asc(ChangeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询等级变更记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_change()).collect())
    }
}
