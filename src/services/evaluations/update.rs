use std::collections::BTreeSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    EvaluationService, ensure_activity_exists, ensure_groups_selectable, load_evaluation_in_scope,
};
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        reconcile::GroupReconciliationPlan, requests::UpdateEvaluationRequest,
        responses::EvaluationMutationResponse,
    },
};
use crate::services::{Flow, OrRespond, finish, not_found, user_and_scope};

pub async fn update_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    update_data: UpdateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    finish(update_evaluation_flow(service, request, evaluation_id, update_data).await)
}

async fn update_evaluation_flow(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    update_data: UpdateEvaluationRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_evaluation_in_scope(&storage, &scope, evaluation_id).await?;

    if let Some(activity_id) = update_data.activity_id {
        ensure_activity_exists(&storage, activity_id).await?;
    }

    // 教师增删的班组都必须在自己的范围内
    if let Some(ref group_ids) = update_data.group_ids
        && scope.group_ids().is_some()
    {
        let current: BTreeSet<i64> = storage
            .list_group_evaluations_by_evaluation(evaluation_id)
            .await
            .or_respond(ErrorCode::InternalServerError, "查询班组评估失败")?
            .into_iter()
            .map(|ge| ge.group_id)
            .collect();
        let selected: BTreeSet<i64> = group_ids.iter().copied().collect();
        let plan = GroupReconciliationPlan::new(&current, &selected);
        ensure_groups_selectable(&scope, plan.to_add.iter().chain(plan.to_remove.iter()))?;
    }

    let (evaluation, summary) = storage
        .update_evaluation(evaluation_id, update_data)
        .await
        .or_respond(ErrorCode::EvaluationUpdateFailed, "更新评估任务失败")?
        .ok_or_else(|| not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"))?;

    info!(
        "用户 {} 更新评估任务 {}：新增 {} 个班组，移除 {} 个班组，补建 {} 条学生评估",
        user.id,
        evaluation.id,
        summary.groups_added,
        summary.groups_removed,
        summary.student_evaluations_created
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EvaluationMutationResponse {
            evaluation,
            summary,
        },
        "Evaluation updated successfully",
    )))
}
