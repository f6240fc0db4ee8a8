use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::{
    Flow, OrRespond, bad_request, finish, load_group_in_scope, load_student_in_scope, not_found,
    user_and_scope,
};
use crate::utils::validate::normalize_rut;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    finish(update_student_flow(service, request, student_id, update_data).await)
}

/// 姓名去除首尾空白，空串视为非法
fn trimmed_name(value: Option<String>) -> Flow<Option<String>> {
    match value {
        None => Ok(None),
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                Err(bad_request(
                    ErrorCode::StudentUpdateFailed,
                    "Student name must not be empty",
                ))
            } else {
                Ok(Some(name))
            }
        }
    }
}

async fn update_student_flow(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update_data: UpdateStudentRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (student, current_group) = load_student_in_scope(&storage, &scope, student_id).await?;

    update_data.first_name = trimmed_name(update_data.first_name.take())?;
    update_data.last_name = trimmed_name(update_data.last_name.take())?;

    if update_data.list_number.is_some_and(|number| number < 1) {
        return Err(bad_request(
            ErrorCode::StudentUpdateFailed,
            "List number must be positive",
        ));
    }

    // 转班：目标班组必须可见、有效且同校
    if let Some(target_group_id) = update_data.group_id
        && target_group_id != student.group_id
    {
        let target = load_group_in_scope(&storage, &scope, target_group_id).await?;
        if !target.active || target.school_id != current_group.school_id {
            return Err(bad_request(
                ErrorCode::StudentUpdateFailed,
                "Target group must be an active group of the same school",
            ));
        }
    }

    if let Some(rut) = update_data.rut.take() {
        let rut =
            normalize_rut(&rut).map_err(|msg| bad_request(ErrorCode::StudentRutInvalid, msg))?;
        let duplicated = storage
            .find_student_by_rut(current_group.school_id, &rut)
            .await
            .or_respond(ErrorCode::StudentUpdateFailed, "查询学生 RUT 失败")?;
        if duplicated.is_some_and(|other| other.id != student.id) {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentRutDuplicated,
                "A student with this RUT already exists in the school",
            )));
        }
        update_data.rut = Some(rut);
    }

    let updated = storage
        .update_student(student_id, update_data)
        .await
        .or_respond(ErrorCode::StudentUpdateFailed, "更新学生失败")?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student not found"))?;

    if updated.group_id != student.group_id {
        info!(
            "学生 {} 已从班组 {} 转到班组 {}",
            updated.id, student.group_id, updated.group_id
        );
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Student updated successfully",
    )))
}
