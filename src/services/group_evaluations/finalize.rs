use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupEvaluationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, user_and_scope,
};

pub async fn finalize_group_evaluation(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(finalize_group_evaluation_flow(service, request, group_evaluation_id).await)
}

async fn finalize_group_evaluation_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_group_evaluation_in_scope(&storage, &scope, group_evaluation_id).await?;

    // 已提交时存储层返回 InvalidTransition，对应 409
    let group_evaluation = storage
        .finalize_group_evaluation(group_evaluation_id)
        .await
        .or_respond(ErrorCode::GroupEvaluationAlreadySent, "提交班组评估失败")?;

    info!("班组评估 {} 已由用户 {} 提交", group_evaluation.id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        group_evaluation,
        "Group evaluation sent successfully",
    )))
}
