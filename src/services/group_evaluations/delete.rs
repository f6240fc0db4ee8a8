use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupEvaluationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, not_found, user_and_scope,
};

pub async fn delete_group_evaluation(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(delete_group_evaluation_flow(service, request, group_evaluation_id).await)
}

async fn delete_group_evaluation_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_group_evaluation_in_scope(&storage, &scope, group_evaluation_id).await?;

    let deleted = storage
        .delete_group_evaluation(group_evaluation_id)
        .await
        .or_respond(ErrorCode::InternalServerError, "删除班组评估失败")?;
    if !deleted {
        return Err(not_found(
            ErrorCode::GroupEvaluationNotFound,
            "Group evaluation not found",
        ));
    }

    info!("班组评估 {} 已被用户 {} 删除", group_evaluation_id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Group evaluation deleted successfully",
    )))
}
