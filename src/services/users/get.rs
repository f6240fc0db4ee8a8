use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::responses::UserResponse};
use crate::services::{Flow, OrRespond, current_user, finish, not_found};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_user_flow(service, request, user_id).await)
}

async fn get_user_flow(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .or_respond(ErrorCode::UserNotFound, "查询用户失败")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "User information retrieved successfully",
    )))
}

pub async fn get_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    finish(current_user(request).map(|user| {
        HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Current user retrieved successfully",
        ))
    }))
}
