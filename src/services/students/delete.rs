use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    Flow, OrRespond, finish, load_student_in_scope, not_found, user_and_scope,
};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(delete_student_flow(service, request, student_id).await)
}

async fn delete_student_flow(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    load_student_in_scope(&storage, &scope, student_id).await?;

    let deleted = storage
        .delete_student(student_id)
        .await
        .or_respond(ErrorCode::InternalServerError, "删除学生失败")?;
    if !deleted {
        return Err(not_found(ErrorCode::StudentNotFound, "Student not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
}
