use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Flow, OrRespond, finish};

pub async fn list_schools(
    service: &SchoolService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    finish(list_schools_flow(service, request).await)
}

async fn list_schools_flow(service: &SchoolService, request: &HttpRequest) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let schools = storage
        .list_schools()
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学校列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        schools,
        "School list retrieved successfully",
    )))
}
