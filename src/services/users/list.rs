use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{UserListParams, UserListQuery},
};
use crate::services::{Flow, OrRespond, finish};

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    query: UserListParams,
) -> ActixResult<HttpResponse> {
    finish(list_users_flow(service, request, query).await)
}

async fn list_users_flow(
    service: &UserService,
    request: &HttpRequest,
    query: UserListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: query.role,
        school_id: query.school_id,
        search: query.search,
    };

    let response = storage
        .list_users_with_pagination(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询用户列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "User list retrieved successfully",
    )))
}
