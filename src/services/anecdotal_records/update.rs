use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AnecdotalRecordService, ensure_activity, ensure_observation_time, load_record_in_scope,
};
use crate::models::{
    ApiResponse, ErrorCode, anecdotal_records::requests::UpdateAnecdotalRecordRequest,
};
use crate::services::{
    Flow, OrRespond, bad_request, finish, forbidden, not_found, user_and_scope,
};

pub async fn update_record(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
    update_data: UpdateAnecdotalRecordRequest,
) -> ActixResult<HttpResponse> {
    finish(update_record_flow(service, request, record_id, update_data).await)
}

async fn update_record_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
    mut update_data: UpdateAnecdotalRecordRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_record_in_scope(&storage, &scope, record_id).await?;

    // 评语只允许协调员填写
    if update_data.comments.is_some() && !user.role.is_coordinator() {
        return Err(forbidden("Only coordinators can write comments"));
    }

    if let Some(source) = update_data.observation_source.take() {
        let source = source.trim().to_string();
        if source.is_empty() {
            return Err(bad_request(
                ErrorCode::AnecdotalRecordUpdateFailed,
                "Observation source is required",
            ));
        }
        update_data.observation_source = Some(source);
    }
    if let Some(minutes) = update_data.observation_time {
        ensure_observation_time(minutes, ErrorCode::AnecdotalRecordUpdateFailed)?;
    }
    ensure_activity(&storage, update_data.activity_id).await?;

    let record = storage
        .update_anecdotal_record(record_id, update_data)
        .await
        .or_respond(ErrorCode::AnecdotalRecordUpdateFailed, "更新轶事记录失败")?
        .ok_or_else(|| {
            not_found(
                ErrorCode::AnecdotalRecordNotFound,
                "Anecdotal record not found",
            )
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Anecdotal record updated successfully",
    )))
}
