use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AnecdotalRecordService, ensure_activity, ensure_observation_time};
use crate::models::{
    ApiResponse, ErrorCode, anecdotal_records::requests::CreateAnecdotalRecordRequest,
};
use crate::services::{
    Flow, OrRespond, bad_request, finish, load_student_in_scope, user_and_scope,
};

pub async fn create_record(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_data: CreateAnecdotalRecordRequest,
) -> ActixResult<HttpResponse> {
    finish(create_record_flow(service, request, record_data).await)
}

async fn create_record_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    mut record_data: CreateAnecdotalRecordRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_student_in_scope(&storage, &scope, record_data.student_id).await?;

    record_data.observation_source = record_data.observation_source.trim().to_string();
    if record_data.observation_source.is_empty() {
        return Err(bad_request(
            ErrorCode::AnecdotalRecordCreationFailed,
            "Observation source is required",
        ));
    }
    ensure_observation_time(
        record_data.observation_time,
        ErrorCode::AnecdotalRecordCreationFailed,
    )?;
    ensure_activity(&storage, record_data.activity_id).await?;

    let record = storage
        .create_anecdotal_record(user.id, record_data)
        .await
        .or_respond(ErrorCode::AnecdotalRecordCreationFailed, "创建轶事记录失败")?;

    info!(
        "用户 {} 为学生 {} 创建轶事记录 {}",
        user.id, record.student_id, record.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        record,
        "Anecdotal record created successfully",
    )))
}
