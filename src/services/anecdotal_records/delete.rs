use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AnecdotalRecordService, load_record_in_scope};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Flow, OrRespond, finish, not_found, user_and_scope};

pub async fn delete_record(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    finish(delete_record_flow(service, request, record_id).await)
}

async fn delete_record_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_record_in_scope(&storage, &scope, record_id).await?;

    // 软删除，记录保留在库中
    let deactivated = storage
        .deactivate_anecdotal_record(record_id)
        .await
        .or_respond(ErrorCode::AnecdotalRecordUpdateFailed, "删除轶事记录失败")?;
    if !deactivated {
        return Err(not_found(
            ErrorCode::AnecdotalRecordNotFound,
            "Anecdotal record not found",
        ));
    }

    info!("轶事记录 {} 已被用户 {} 删除", record_id, user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Anecdotal record deleted successfully",
    )))
}
