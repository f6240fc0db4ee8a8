use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GroupService, ensure_responsible_professor};
use crate::models::{ApiResponse, ErrorCode, groups::requests::CreateGroupRequest};
use crate::services::{Flow, OrRespond, bad_request, finish, forbidden, user_and_scope};

pub async fn create_group(
    service: &GroupService,
    request: &HttpRequest,
    group_data: CreateGroupRequest,
) -> ActixResult<HttpResponse> {
    finish(create_group_flow(service, request, group_data).await)
}

async fn create_group_flow(
    service: &GroupService,
    request: &HttpRequest,
    mut group_data: CreateGroupRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;

    // 班组归属于当前用户的学校
    let school_id = scope
        .school_id()
        .ok_or_else(|| forbidden("A school is required to create groups"))?;

    group_data.name = group_data.name.trim().to_string();
    if group_data.name.is_empty() {
        return Err(bad_request(
            ErrorCode::GroupCreationFailed,
            "Group name must not be empty",
        ));
    }

    if let Some(professor_id) = group_data.responsible_professor_id {
        ensure_responsible_professor(&storage, school_id, professor_id).await?;
    }

    let group = storage
        .create_group(school_id, group_data)
        .await
        .or_respond(ErrorCode::GroupCreationFailed, "创建班组失败")?;

    info!("班组 {} 已创建 (ID: {}, 学校: {})", group.name, group.id, school_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        group,
        "Group created successfully",
    )))
}
