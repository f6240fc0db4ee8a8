use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::requests::{EvaluationListParams, EvaluationListQuery},
};
use crate::services::{Flow, OrRespond, finish, today, user_and_scope};

pub async fn list_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    query: EvaluationListParams,
) -> ActixResult<HttpResponse> {
    finish(list_evaluations_flow(service, request, query).await)
}

async fn list_evaluations_flow(
    service: &EvaluationService,
    request: &HttpRequest,
    query: EvaluationListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;

    let list_query = EvaluationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        level: query.level,
        search: query.search,
    };

    let response = storage
        .list_evaluations_with_pagination(&scope, list_query, today())
        .await
        .or_respond(ErrorCode::InternalServerError, "查询评估任务列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Evaluation list retrieved successfully",
    )))
}
