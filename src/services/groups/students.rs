use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::{
    Flow, OrRespond, bad_request, finish, load_group_in_scope, user_and_scope,
};
use crate::utils::validate::normalize_rut;

pub async fn list_group_students(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
) -> ActixResult<HttpResponse> {
    finish(list_group_students_flow(service, request, group_id).await)
}

async fn list_group_students_flow(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    load_group_in_scope(&storage, &scope, group_id).await?;

    let students = storage
        .list_students_by_group(group_id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组学生失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        students,
        "Group students retrieved successfully",
    )))
}

pub async fn add_group_student(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    finish(add_group_student_flow(service, request, group_id, student_data).await)
}

async fn add_group_student_flow(
    service: &GroupService,
    request: &HttpRequest,
    group_id: i64,
    mut student_data: CreateStudentRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let group = load_group_in_scope(&storage, &scope, group_id).await?;

    if !group.active {
        return Err(bad_request(
            ErrorCode::StudentCreationFailed,
            "Cannot add students to an inactive group",
        ));
    }

    student_data.first_name = student_data.first_name.trim().to_string();
    student_data.last_name = student_data.last_name.trim().to_string();
    if student_data.first_name.is_empty() || student_data.last_name.is_empty() {
        return Err(bad_request(
            ErrorCode::StudentCreationFailed,
            "Student name must not be empty",
        ));
    }
    if student_data.list_number < 1 {
        return Err(bad_request(
            ErrorCode::StudentCreationFailed,
            "List number must be positive",
        ));
    }

    student_data.rut = normalize_rut(&student_data.rut)
        .map_err(|msg| bad_request(ErrorCode::StudentRutInvalid, msg))?;

    // RUT 在学校范围内唯一
    let duplicated = storage
        .find_student_by_rut(group.school_id, &student_data.rut)
        .await
        .or_respond(ErrorCode::StudentCreationFailed, "查询学生 RUT 失败")?;
    if duplicated.is_some() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::StudentRutDuplicated,
            "A student with this RUT already exists in the school",
        )));
    }

    let student = storage
        .create_student(group_id, student_data)
        .await
        .or_respond(ErrorCode::StudentCreationFailed, "创建学生失败")?;

    info!("学生 {} 已加入班组 {}", student.id, group_id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        student,
        "Student created successfully",
    )))
}
