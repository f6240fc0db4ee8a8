//! 评估任务存储操作
//!
//! 创建、编辑（班组对账）与删除都在单个事务内完成，任一步失败整体回滚。

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use super::SeaOrmStorage;
use crate::entity::activities::{Column as ActivityColumn, Entity as Activities};
use crate::entity::general_evaluations::{ActiveModel, Column, Entity as GeneralEvaluations};
use crate::entity::group_evaluations::{
    ActiveModel as GroupEvaluationActiveModel, Column as GroupEvaluationColumn,
    Entity as GroupEvaluations,
};
use crate::entity::groups::{Column as GroupColumn, Entity as Groups};
use crate::entity::learning_targets::{Column as TargetColumn, Entity as LearningTargets};
use crate::entity::student_evaluation_changes::{
    Column as ChangeColumn, Entity as StudentEvaluationChanges,
};
use crate::entity::student_evaluations::{
    ActiveModel as StudentEvaluationActiveModel, Column as StudentEvaluationColumn,
    Entity as StudentEvaluations,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{ClassPointError, Result};
use crate::models::common::pagination::normalize_page;
use crate::models::{
    PaginationInfo,
    evaluations::{
        aggregation::{completion_percent, evaluation_status},
        entities::{Classification, GeneralEvaluation, GroupEvaluationStatus},
        reconcile::{GroupReconciliationPlan, missing_students},
        requests::{EvaluationListQuery, NewEvaluation, UpdateEvaluationRequest},
        responses::{EvaluationListItem, EvaluationListResponse, ReconciliationSummary},
    },
    groups::entities::GroupLevel,
    users::scope::AccessScope,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 校验班组均存在、有效且属于该学校，返回去重后的集合
async fn validate_groups_in<C: ConnectionTrait>(
    conn: &C,
    school_id: i64,
    group_ids: &[i64],
) -> Result<BTreeSet<i64>> {
    let requested: BTreeSet<i64> = group_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(requested);
    }

    let found: Vec<i64> = Groups::find()
        .select_only()
        .column(GroupColumn::Id)
        .filter(GroupColumn::Id.is_in(requested.iter().copied().collect::<Vec<_>>()))
        .filter(GroupColumn::SchoolId.eq(school_id))
        .filter(GroupColumn::Active.eq(true))
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("查询班组失败: {e}")))?;

    if found.len() != requested.len() {
        let found: HashSet<i64> = found.into_iter().collect();
        let invalid: Vec<String> = requested
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        return Err(ClassPointError::validation(format!(
            "班组不存在、已停用或不属于该学校: {}",
            invalid.join(", ")
        )));
    }

    Ok(requested)
}

/// 为指定学生批量创建未评估的学生评估，返回创建条数
pub(super) async fn insert_student_evaluations_in<C: ConnectionTrait>(
    conn: &C,
    group_evaluation_id: i64,
    student_ids: &[i64],
    now: i64,
) -> Result<i64> {
    if student_ids.is_empty() {
        return Ok(0);
    }

    let models = student_ids.iter().map(|student_id| StudentEvaluationActiveModel {
        group_evaluation_id: Set(group_evaluation_id),
        student_id: Set(*student_id),
        classification: Set(Classification::NotEvaluated.value()),
        annotations: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    });

    StudentEvaluations::insert_many(models)
        .exec(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("创建学生评估失败: {e}")))?;

    Ok(student_ids.len() as i64)
}

/// 班组当前成员（按名单序号）
async fn group_member_ids_in<C: ConnectionTrait>(conn: &C, group_id: i64) -> Result<Vec<i64>> {
    Students::find()
        .select_only()
        .column(StudentColumn::Id)
        .filter(StudentColumn::GroupId.eq(group_id))
        .order_by_asc(StudentColumn::ListNumber)
        .order_by_asc(StudentColumn::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("查询班组成员失败: {e}")))
}

/// 创建草稿班组评估并为每名成员建学生评估，返回学生评估条数
async fn create_group_evaluation_in<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
    group_id: i64,
    now: i64,
) -> Result<i64> {
    let group_evaluation = GroupEvaluationActiveModel {
        evaluation_id: Set(evaluation_id),
        group_id: Set(group_id),
        status: Set(GroupEvaluationStatus::Draft.value()),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| ClassPointError::database_operation(format!("创建班组评估失败: {e}")))?;

    let members = group_member_ids_in(conn, group_id).await?;
    insert_student_evaluations_in(conn, group_evaluation.id, &members, now).await
}

/// 级联删除班组评估：变更记录 → 学生评估 → 班组评估
pub(super) async fn delete_group_evaluations_in<C: ConnectionTrait>(
    conn: &C,
    group_evaluation_ids: &[i64],
) -> Result<u64> {
    if group_evaluation_ids.is_empty() {
        return Ok(0);
    }

    let student_evaluation_ids: Vec<i64> = StudentEvaluations::find()
        .select_only()
        .column(StudentEvaluationColumn::Id)
        .filter(StudentEvaluationColumn::GroupEvaluationId.is_in(group_evaluation_ids.to_vec()))
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

    if !student_evaluation_ids.is_empty() {
        StudentEvaluationChanges::delete_many()
            .filter(ChangeColumn::StudentEvaluationId.is_in(student_evaluation_ids))
            .exec(conn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("删除变更记录失败: {e}")))?;
    }

    StudentEvaluations::delete_many()
        .filter(StudentEvaluationColumn::GroupEvaluationId.is_in(group_evaluation_ids.to_vec()))
        .exec(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("删除学生评估失败: {e}")))?;

    let result = GroupEvaluations::delete_many()
        .filter(GroupEvaluationColumn::Id.is_in(group_evaluation_ids.to_vec()))
        .exec(conn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("删除班组评估失败: {e}")))?;

    Ok(result.rows_affected)
}

impl SeaOrmStorage {
    /// 创建评估任务
    pub async fn create_evaluation_impl(
        &self,
        evaluation: NewEvaluation,
    ) -> Result<(GeneralEvaluation, ReconciliationSummary)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("开启事务失败: {e}")))?;

        let group_ids = validate_groups_in(&txn, evaluation.school_id, &evaluation.group_ids).await?;

        let model = ActiveModel {
            school_id: Set(evaluation.school_id),
            activity_id: Set(evaluation.activity_id),
            due_date: Set(evaluation.due_date),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassPointError::database_operation(format!("创建评估任务失败: {e}")))?;

        let mut summary = ReconciliationSummary::default();
        for group_id in &group_ids {
            summary.student_evaluations_created +=
                create_group_evaluation_in(&txn, model.id, *group_id, now).await?;
            summary.groups_added += 1;
        }

        txn.commit()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "评估任务 {} 已创建: {} 个班组, {} 条学生评估",
            model.id, summary.groups_added, summary.student_evaluations_created
        );

        Ok((model.into_general_evaluation(), summary))
    }

    pub async fn get_evaluation_by_id_impl(&self, id: i64) -> Result<Option<GeneralEvaluation>> {
        let result = GeneralEvaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询评估任务失败: {e}")))?;

        Ok(result.map(|m| m.into_general_evaluation()))
    }

    /// 单个评估任务的列表项（含派生状态）
    pub async fn get_evaluation_item_impl(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<Option<EvaluationListItem>> {
        let Some(evaluation) = self.get_evaluation_by_id_impl(id).await? else {
            return Ok(None);
        };
        let mut items = self.build_evaluation_items(vec![evaluation], today).await?;
        Ok(items.pop())
    }

    /// 分页列出评估任务并计算完成度与派生状态
    pub async fn list_evaluations_with_pagination_impl(
        &self,
        scope: &AccessScope,
        query: EvaluationListQuery,
        today: NaiveDate,
    ) -> Result<EvaluationListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = GeneralEvaluations::find().filter(Column::Active.eq(true));

        if let Some(school_id) = scope.school_id() {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        // 教师只看到包含其负责班组的任务
        if let Some(group_ids) = scope.group_ids() {
            let evaluation_ids: Vec<i64> = GroupEvaluations::find()
                .select_only()
                .column(GroupEvaluationColumn::EvaluationId)
                .filter(GroupEvaluationColumn::GroupId.is_in(group_ids.to_vec()))
                .distinct()
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    ClassPointError::database_operation(format!("查询班组评估失败: {e}"))
                })?;
            select = select.filter(Column::Id.is_in(evaluation_ids));
        }

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if query.level.is_some() || search.is_some() {
            let activity_ids = self.find_activity_ids(query.level, search).await?;
            select = select.filter(Column::ActivityId.is_in(activity_ids));
        }

        select = select
            .order_by_desc(Column::DueDate)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            ClassPointError::database_operation(format!("查询评估任务总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            ClassPointError::database_operation(format!("查询评估任务页数失败: {e}"))
        })?;

        let evaluations = paginator.fetch_page(page - 1).await.map_err(|e| {
            ClassPointError::database_operation(format!("查询评估任务列表失败: {e}"))
        })?;

        let evaluations: Vec<GeneralEvaluation> = evaluations
            .into_iter()
            .map(|m| m.into_general_evaluation())
            .collect();

        let items = self.build_evaluation_items(evaluations, today).await?;

        Ok(EvaluationListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按等级与活动编码筛选活动 ID
    async fn find_activity_ids(
        &self,
        level: Option<GroupLevel>,
        search: Option<&str>,
    ) -> Result<Vec<i64>> {
        let mut select = Activities::find().select_only().column(ActivityColumn::Id);

        if let Some(level) = level {
            let target_ids: Vec<i64> = LearningTargets::find()
                .select_only()
                .column(TargetColumn::Id)
                .filter(TargetColumn::Level.eq(level.to_string()))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    ClassPointError::database_operation(format!("查询学习目标失败: {e}"))
                })?;
            select = select.filter(ActivityColumn::LearningTargetId.is_in(target_ids));
        }

        if let Some(search) = search {
            let escaped = escape_like_pattern(search);
            select = select.filter(ActivityColumn::Code.contains(&escaped));
        }

        select
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动失败: {e}")))
    }

    /// 为一页评估任务批量加载活动、学习目标与班组评估计数
    pub(super) async fn build_evaluation_items(
        &self,
        evaluations: Vec<GeneralEvaluation>,
        today: NaiveDate,
    ) -> Result<Vec<EvaluationListItem>> {
        if evaluations.is_empty() {
            return Ok(Vec::new());
        }

        let evaluation_ids: Vec<i64> = evaluations.iter().map(|e| e.id).collect();
        let activity_ids: Vec<i64> = evaluations.iter().map(|e| e.activity_id).collect();

        let activities: HashMap<i64, (String, i64)> = Activities::find()
            .filter(ActivityColumn::Id.is_in(activity_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.code, m.learning_target_id)))
            .collect();

        let target_ids: Vec<i64> = activities.values().map(|(_, target)| *target).collect();
        let targets: HashMap<i64, (String, String)> = LearningTargets::find()
            .filter(TargetColumn::Id.is_in(target_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学习目标失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.name, m.level)))
            .collect();

        let group_counts = self.count_group_evaluations(&evaluation_ids, None).await?;
        let sent_counts = self
            .count_group_evaluations(&evaluation_ids, Some(GroupEvaluationStatus::Sent))
            .await?;

        let items = evaluations
            .into_iter()
            .map(|evaluation| {
                let (activity_code, target_id) = activities
                    .get(&evaluation.activity_id)
                    .cloned()
                    .unwrap_or_default();
                let (learning_target_name, level) =
                    targets.get(&target_id).cloned().unwrap_or_default();

                let group_count = group_counts.get(&evaluation.id).copied().unwrap_or(0);
                let sent_count = sent_counts.get(&evaluation.id).copied().unwrap_or(0);
                let percent = completion_percent(sent_count as u64, group_count as u64);
                let status = evaluation_status(percent, today, evaluation.due_date);

                EvaluationListItem {
                    evaluation,
                    activity_code,
                    learning_target_name,
                    level: GroupLevel::from_stored(&level),
                    group_count,
                    sent_count,
                    completion_percent: percent,
                    status_label: status.display_name().to_string(),
                    status_class: status.css_class().to_string(),
                    status,
                }
            })
            .collect();

        Ok(items)
    }

    /// 每个评估任务下（可按状态过滤）的班组评估数
    async fn count_group_evaluations(
        &self,
        evaluation_ids: &[i64],
        status: Option<GroupEvaluationStatus>,
    ) -> Result<HashMap<i64, i64>> {
        let mut select = GroupEvaluations::find()
            .select_only()
            .column(GroupEvaluationColumn::EvaluationId)
            .column_as(GroupEvaluationColumn::Id.count(), "group_count")
            .filter(GroupEvaluationColumn::EvaluationId.is_in(evaluation_ids.to_vec()))
            .filter(GroupEvaluationColumn::Active.eq(true));

        if let Some(status) = status {
            select = select.filter(GroupEvaluationColumn::Status.eq(status.value()));
        }

        let rows = select
            .group_by(GroupEvaluationColumn::EvaluationId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| {
                ClassPointError::database_operation(format!("统计班组评估数量失败: {e}"))
            })?;

        Ok(rows.into_iter().collect())
    }

    /// 更新评估任务；提供班组集合时对账
    pub async fn update_evaluation_impl(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<(GeneralEvaluation, ReconciliationSummary)>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = GeneralEvaluations::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询评估任务失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(activity_id) = update.activity_id {
            model.activity_id = Set(activity_id);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date);
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("更新评估任务失败: {e}")))?;

        let mut summary = ReconciliationSummary::default();

        if let Some(group_ids) = update.group_ids {
            let current = GroupEvaluations::find()
                .filter(GroupEvaluationColumn::EvaluationId.eq(id))
                .all(&txn)
                .await
                .map_err(|e| {
                    ClassPointError::database_operation(format!("查询班组评估失败: {e}"))
                })?;

            let before: BTreeSet<i64> = current.iter().map(|ge| ge.group_id).collect();
            let after: BTreeSet<i64> = group_ids.iter().copied().collect();
            let plan = GroupReconciliationPlan::new(&before, &after);

            // 只校验新加入的班组；已关联的班组即使后来停用也保留其评分
            let to_add: Vec<i64> = plan.to_add.iter().copied().collect();
            validate_groups_in(&txn, existing.school_id, &to_add).await?;

            let removed_ids: Vec<i64> = current
                .iter()
                .filter(|ge| plan.to_remove.contains(&ge.group_id))
                .map(|ge| ge.id)
                .collect();
            delete_group_evaluations_in(&txn, &removed_ids).await?;
            summary.groups_removed = plan.to_remove.len() as i64;

            for group_id in &plan.to_add {
                summary.student_evaluations_created +=
                    create_group_evaluation_in(&txn, id, *group_id, now).await?;
                summary.groups_added += 1;
            }

            // 保留的班组只为新成员补建学生评估
            for group_evaluation in current
                .iter()
                .filter(|ge| plan.to_keep.contains(&ge.group_id))
            {
                let members = group_member_ids_in(&txn, group_evaluation.group_id).await?;
                let evaluated: HashSet<i64> = StudentEvaluations::find()
                    .select_only()
                    .column(StudentEvaluationColumn::StudentId)
                    .filter(StudentEvaluationColumn::GroupEvaluationId.eq(group_evaluation.id))
                    .into_tuple::<i64>()
                    .all(&txn)
                    .await
                    .map_err(|e| {
                        ClassPointError::database_operation(format!("查询学生评估失败: {e}"))
                    })?
                    .into_iter()
                    .collect();

                let missing = missing_students(&members, &evaluated);
                summary.student_evaluations_created +=
                    insert_student_evaluations_in(&txn, group_evaluation.id, &missing, now)
                        .await?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "评估任务 {} 已更新: +{} / -{} 个班组, {} 条学生评估",
            id, summary.groups_added, summary.groups_removed, summary.student_evaluations_created
        );

        Ok(Some((updated.into_general_evaluation(), summary)))
    }

    /// 级联删除评估任务
    pub async fn delete_evaluation_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("开启事务失败: {e}")))?;

        let group_evaluation_ids: Vec<i64> = GroupEvaluations::find()
            .select_only()
            .column(GroupEvaluationColumn::Id)
            .filter(GroupEvaluationColumn::EvaluationId.eq(id))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组评估失败: {e}")))?;

        delete_group_evaluations_in(&txn, &group_evaluation_ids).await?;

        let result = GeneralEvaluations::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("删除评估任务失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassPointError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
