use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::{
    ApiResponse, ErrorCode,
    groups::requests::{GroupListParams, GroupListQuery},
};
use crate::services::{Flow, OrRespond, finish, user_and_scope};

pub async fn list_groups(
    service: &GroupService,
    request: &HttpRequest,
    query: GroupListParams,
) -> ActixResult<HttpResponse> {
    finish(list_groups_flow(service, request, query).await)
}

async fn list_groups_flow(
    service: &GroupService,
    request: &HttpRequest,
    query: GroupListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;

    let list_query = GroupListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        level: query.level,
        search: query.search,
        include_inactive: query.include_inactive,
    };

    let response = storage
        .list_groups_with_pagination(&scope, list_query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Group list retrieved successfully",
    )))
}
