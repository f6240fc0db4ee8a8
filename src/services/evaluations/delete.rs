use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EvaluationService, load_evaluation_in_scope};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Flow, OrRespond, finish, not_found, user_and_scope};

pub async fn delete_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(delete_evaluation_flow(service, request, evaluation_id).await)
}

async fn delete_evaluation_flow(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_evaluation_in_scope(&storage, &scope, evaluation_id).await?;

    let deleted = storage
        .delete_evaluation(evaluation_id)
        .await
        .or_respond(ErrorCode::EvaluationDeleteFailed, "删除评估任务失败")?;
    if !deleted {
        return Err(not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"));
    }

    info!("评估任务 {} 已被用户 {} 删除", evaluation_id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Evaluation deleted successfully")))
}
