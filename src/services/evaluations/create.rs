use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Duration;
use tracing::info;

use super::{EvaluationService, ensure_activity_exists, ensure_groups_selectable};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        requests::{CreateEvaluationRequest, NewEvaluation},
        responses::EvaluationMutationResponse,
    },
};
use crate::services::{Flow, OrRespond, finish, forbidden, today, user_and_scope};

pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_data: CreateEvaluationRequest,
) -> ActixResult<HttpResponse> {
    finish(create_evaluation_flow(service, request, evaluation_data).await)
}

async fn create_evaluation_flow(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_data: CreateEvaluationRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;

    let school_id = scope
        .school_id()
        .ok_or_else(|| forbidden("A school is required to create evaluations"))?;

    ensure_activity_exists(&storage, evaluation_data.activity_id).await?;
    ensure_groups_selectable(&scope, &evaluation_data.group_ids)?;

    let due_date = evaluation_data.due_date.unwrap_or_else(|| {
        today() + Duration::days(AppConfig::get().evaluation.default_due_days)
    });

    let new_evaluation = NewEvaluation {
        school_id,
        activity_id: evaluation_data.activity_id,
        due_date,
        group_ids: evaluation_data.group_ids,
    };

    // 班组不属于本校时存储层返回校验错误（400）
    let (evaluation, summary) = storage
        .create_evaluation(new_evaluation)
        .await
        .or_respond(ErrorCode::InvalidGroupSelection, "创建评估任务失败")?;

    info!(
        "用户 {} 创建评估任务 {}：{} 个班组，{} 条学生评估",
        user.id, evaluation.id, summary.groups_added, summary.student_evaluations_created
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        EvaluationMutationResponse {
            evaluation,
            summary,
        },
        "Evaluation created successfully",
    )))
}
