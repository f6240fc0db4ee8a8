use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::services::{Flow, finish, load_student_in_scope, user_and_scope};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_student_flow(service, request, student_id).await)
}

async fn get_student_flow(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (student, _) = load_student_in_scope(&storage, &scope, student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student retrieved successfully",
    )))
}
