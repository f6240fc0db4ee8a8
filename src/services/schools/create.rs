use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolService;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{Flow, OrRespond, bad_request, finish};

pub async fn create_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_data: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    finish(create_school_flow(service, request, school_data).await)
}

async fn create_school_flow(
    service: &SchoolService,
    request: &HttpRequest,
    school_data: CreateSchoolRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let name = school_data.name.trim().to_string();
    if name.is_empty() {
        return Err(bad_request(
            ErrorCode::SchoolCreationFailed,
            "School name must not be empty",
        ));
    }

    let school = storage
        .create_school(name)
        .await
        .or_respond(ErrorCode::SchoolCreationFailed, "创建学校失败")?;

    info!("学校 {} 已创建 (ID: {})", school.name, school.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        school,
        "School created successfully",
    )))
}
