use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Flow, OrRespond, finish, load_group_in_scope, not_found, user_and_scope};

pub async fn delete_group(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
) -> ActixResult<HttpResponse> {
    finish(delete_group_flow(service, request, group_id).await)
}

async fn delete_group_flow(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_group_in_scope(&storage, &scope, group_id).await?;

    // 班组停用而非物理删除，历史评估保持可查
    let deactivated = storage
        .delete_group(group_id)
        .await
        .or_respond(ErrorCode::GroupDeleteFailed, "停用班组失败")?;
    if !deactivated {
        return Err(not_found(ErrorCode::GroupNotFound, "Group not found"));
    }

    info!("班组 {} 已被用户 {} 停用", group_id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Group deactivated successfully")))
}
