use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::{Flow, OrRespond, bad_request, finish, not_found};
use crate::utils::validate::{validate_email, validate_username};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    finish(create_user_flow(service, request, user_data).await)
}

async fn create_user_flow(
    service: &UserService,
    request: &HttpRequest,
    user_data: CreateUserRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    validate_username(&user_data.username)
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    validate_email(&user_data.email)
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;

    let existing = storage
        .get_user_by_username(&user_data.username)
        .await
        .or_respond(ErrorCode::UserCreationFailed, "查询用户失败")?;
    if existing.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserAlreadyExists,
            "Username already exists",
        )));
    }

    // 教职工（管理员除外）必须隶属学校
    match user_data.school_id {
        Some(school_id) => {
            storage
                .get_school_by_id(school_id)
                .await
                .or_respond(ErrorCode::SchoolNotFound, "查询学校失败")?
                .ok_or_else(|| not_found(ErrorCode::SchoolNotFound, "School not found"))?;
        }
        None if user_data.role != UserRole::Admin => {
            return Err(bad_request(
                ErrorCode::UserWithoutSchool,
                "Staff members must belong to a school",
            ));
        }
        None => {}
    }

    let user = storage
        .create_user(user_data)
        .await
        .or_respond(ErrorCode::UserCreationFailed, "创建用户失败")?;

    info!("用户 {} 已创建 (ID: {}, 角色: {})", user.username, user.id, user.role);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserResponse { user },
        "User created successfully",
    )))
}
