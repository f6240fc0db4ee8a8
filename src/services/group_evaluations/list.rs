use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupEvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::requests::{GroupEvaluationListParams, GroupEvaluationListQuery},
};
use crate::services::{Flow, OrRespond, finish, user_and_scope};

pub async fn list_group_evaluations(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    query: GroupEvaluationListParams,
) -> ActixResult<HttpResponse> {
    finish(list_group_evaluations_flow(service, request, query).await)
}

async fn list_group_evaluations_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    query: GroupEvaluationListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;

    let list_query = GroupEvaluationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
        group_id: query.group_id,
    };

    let response = storage
        .list_group_evaluations_with_pagination(&scope, list_query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组评估列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Group evaluation list retrieved successfully",
    )))
}
