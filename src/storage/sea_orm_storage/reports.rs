//! 报表事实查询
//!
//! 逐层批量加载学习目标、活动、评估任务、已提交的班组评估与学生评估，
//! 在内存中联结为扁平的评估事实行。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::activities::{Column as ActivityColumn, Entity as Activities};
use crate::entity::general_evaluations::{
    Column as EvaluationColumn, Entity as GeneralEvaluations,
};
use crate::entity::group_evaluations::{Column as GroupEvaluationColumn, Entity as GroupEvaluations};
use crate::entity::learning_targets::{Column as TargetColumn, Entity as LearningTargets};
use crate::entity::student_evaluations::{
    Column as StudentEvaluationColumn, Entity as StudentEvaluations,
};
use crate::errors::{ClassPointError, Result};
use crate::models::evaluations::entities::{Classification, GroupEvaluationStatus};
use crate::models::learning_targets::entities::LearningTarget;
use crate::models::reports::entities::{EvaluationFact, EvaluationFactFilter};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    pub async fn list_evaluation_facts_impl(
        &self,
        filter: EvaluationFactFilter,
    ) -> Result<Vec<EvaluationFact>> {
        let mut targets_select = LearningTargets::find();
        if let Some(core) = filter.core {
            targets_select = targets_select.filter(TargetColumn::Core.eq(core.to_string()));
        }
        if let Some(level) = filter.level {
            targets_select = targets_select.filter(TargetColumn::Level.eq(level.to_string()));
        }
        if let Some(target_id) = filter.learning_target_id {
            targets_select = targets_select.filter(TargetColumn::Id.eq(target_id));
        }

        let targets: HashMap<i64, LearningTarget> = targets_select
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学习目标失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_learning_target()))
            .collect();

        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let activities: HashMap<i64, (String, i64)> = Activities::find()
            .filter(ActivityColumn::LearningTargetId.is_in(targets.keys().copied().collect::<Vec<_>>()))
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询活动失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.code, m.learning_target_id)))
            .collect();

        if activities.is_empty() {
            return Ok(Vec::new());
        }

        let mut evaluations_select = GeneralEvaluations::find()
            .filter(EvaluationColumn::Active.eq(true))
            .filter(
                EvaluationColumn::ActivityId
                    .is_in(activities.keys().copied().collect::<Vec<_>>()),
            );
        if let Some(school_id) = filter.school_id {
            evaluations_select = evaluations_select.filter(EvaluationColumn::SchoolId.eq(school_id));
        }

        let evaluations: HashMap<i64, (i64, chrono::NaiveDate)> = evaluations_select
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询评估任务失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.activity_id, m.due_date)))
            .collect();

        if evaluations.is_empty() {
            return Ok(Vec::new());
        }

        let mut group_evaluations_select = GroupEvaluations::find()
            .filter(GroupEvaluationColumn::Active.eq(true))
            .filter(GroupEvaluationColumn::Status.eq(GroupEvaluationStatus::Sent.value()))
            .filter(
                GroupEvaluationColumn::EvaluationId
                    .is_in(evaluations.keys().copied().collect::<Vec<_>>()),
            );
        if let Some(group_id) = filter.group_id {
            group_evaluations_select =
                group_evaluations_select.filter(GroupEvaluationColumn::GroupId.eq(group_id));
        }
        if let Some(group_ids) = filter.group_ids {
            group_evaluations_select =
                group_evaluations_select.filter(GroupEvaluationColumn::GroupId.is_in(group_ids));
        }
        if let Some(ids) = filter.group_evaluation_ids {
            group_evaluations_select =
                group_evaluations_select.filter(GroupEvaluationColumn::Id.is_in(ids));
        }

        let group_evaluations: HashMap<i64, (i64, i64)> = group_evaluations_select
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询班组评估失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, (m.evaluation_id, m.group_id)))
            .collect();

        if group_evaluations.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_evaluations_select = StudentEvaluations::find().filter(
            StudentEvaluationColumn::GroupEvaluationId
                .is_in(group_evaluations.keys().copied().collect::<Vec<_>>()),
        );
        if let Some(student_id) = filter.student_id {
            student_evaluations_select =
                student_evaluations_select.filter(StudentEvaluationColumn::StudentId.eq(student_id));
        }

        let student_evaluations = student_evaluations_select
            .order_by_asc(StudentEvaluationColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassPointError::database_operation(format!("查询学生评估失败: {e}")))?;

        let mut facts: Vec<EvaluationFact> = student_evaluations
            .into_iter()
            .filter_map(|row| {
                let (evaluation_id, group_id) = *group_evaluations.get(&row.group_evaluation_id)?;
                let (activity_id, due_date) = *evaluations.get(&evaluation_id)?;
                let (activity_code, target_id) = activities.get(&activity_id)?;
                let target = targets.get(target_id)?;

                Some(EvaluationFact {
                    student_evaluation_id: row.id,
                    student_id: row.student_id,
                    group_evaluation_id: row.group_evaluation_id,
                    group_id,
                    evaluation_id,
                    due_date,
                    activity_code: activity_code.clone(),
                    learning_target_id: target.id,
                    learning_target_identifier: target.identifier,
                    learning_target_name: target.name.clone(),
                    learning_target_abbreviated_name: target.abbreviated_name.clone(),
                    core: target.core,
                    level: target.level,
                    classification: Classification::from_value(row.classification)
                        .unwrap_or_default(),
                })
            })
            .collect();

        facts.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.group_evaluation_id.cmp(&b.group_evaluation_id))
                .then(a.student_evaluation_id.cmp(&b.student_evaluation_id))
        });

        Ok(facts)
    }
}
