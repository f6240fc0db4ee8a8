use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupService, ensure_responsible_professor};
use crate::models::{ApiResponse, ErrorCode, groups::requests::UpdateGroupRequest};
use crate::services::{
    Flow, OrRespond, bad_request, finish, load_group_in_scope, not_found, user_and_scope,
};

pub async fn update_group(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
    update_data: UpdateGroupRequest,
) -> ActixResult<HttpResponse> {
    finish(update_group_flow(service, request, group_id, update_data).await)
}

async fn update_group_flow(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
    mut update_data: UpdateGroupRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let group = load_group_in_scope(&storage, &scope, group_id).await?;

    if let Some(name) = update_data.name.take() {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(bad_request(
                ErrorCode::GroupUpdateFailed,
                "Group name must not be empty",
            ));
        }
        update_data.name = Some(name);
    }

    if let Some(professor_id) = update_data.responsible_professor_id {
        ensure_responsible_professor(&storage, group.school_id, professor_id).await?;
    }

    let updated = storage
        .update_group(group_id, update_data)
        .await
        .or_respond(ErrorCode::GroupUpdateFailed, "更新班组失败")?
        .ok_or_else(|| not_found(ErrorCode::GroupNotFound, "Group not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Group updated successfully",
    )))
}
