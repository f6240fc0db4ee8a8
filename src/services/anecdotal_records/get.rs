use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnecdotalRecordService, load_record_in_scope};
use crate::models::ApiResponse;
use crate::services::{Flow, finish, user_and_scope};

pub async fn get_record(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_record_flow(service, request, record_id).await)
}

async fn get_record_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    record_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let record = load_record_in_scope(&storage, &scope, record_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Anecdotal record retrieved successfully",
    )))
}
