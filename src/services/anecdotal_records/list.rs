use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnecdotalRecordService;
use crate::models::{
    ApiResponse, ErrorCode,
    anecdotal_records::{
        requests::{StudentsWithRecordsParams, StudentsWithRecordsQuery},
        responses::StudentRecordsResponse,
    },
};
use crate::services::{Flow, OrRespond, finish, load_student_in_scope, user_and_scope};

pub async fn list_students_with_records(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    query: StudentsWithRecordsParams,
) -> ActixResult<HttpResponse> {
    finish(list_students_with_records_flow(service, request, query).await)
}

async fn list_students_with_records_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    query: StudentsWithRecordsParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;

    let list_query = StudentsWithRecordsQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    let response = storage
        .list_students_with_records(&scope, list_query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询有记录的学生失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Students with records retrieved successfully",
    )))
}

pub async fn list_student_records(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(list_student_records_flow(service, request, student_id).await)
}

async fn list_student_records_flow(
    service: &AnecdotalRecordService,
    request: &HttpRequest,
    student_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (student, _) = load_student_in_scope(&storage, &scope, student_id).await?;

    let records = storage
        .list_anecdotal_records_for_student(student.id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询轶事记录失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentRecordsResponse { student, records },
        "Student records retrieved successfully",
    )))
}
