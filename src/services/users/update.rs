use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{Flow, OrRespond, bad_request, finish, not_found};
use crate::utils::validate::validate_email;

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    finish(update_user_flow(service, request, user_id, update_data).await)
}

async fn update_user_flow(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update_data: UpdateUserRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(ref email) = update_data.email {
        validate_email(email).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }

    if let Some(school_id) = update_data.school_id {
        storage
            .get_school_by_id(school_id)
            .await
            .or_respond(ErrorCode::SchoolNotFound, "查询学校失败")?
            .ok_or_else(|| not_found(ErrorCode::SchoolNotFound, "School not found"))?;
    }

    let user = storage
        .update_user(user_id, update_data)
        .await
        .or_respond(ErrorCode::UserUpdateFailed, "更新用户失败")?
        .ok_or_else(|| not_found(ErrorCode::UserNotFound, "User not found"))?;

    // 角色或状态可能变化，已缓存的认证信息在 TTL 到期后刷新
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user },
        "User information updated successfully",
    )))
}
