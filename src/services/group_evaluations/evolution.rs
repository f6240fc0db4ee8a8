use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupEvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{responses::StudentEvolutionResponse, timeline::build_timeline},
};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, not_found, today, user_and_scope,
};

pub async fn get_student_evolution(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_student_evolution_flow(service, request, group_evaluation_id, student_id).await)
}

async fn get_student_evolution_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
    student_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (group_evaluation, _) =
        load_group_evaluation_in_scope(&storage, &scope, group_evaluation_id).await?;

    let student = storage
        .get_student_by_id(student_id)
        .await
        .or_respond(ErrorCode::StudentNotFound, "查询学生失败")?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student not found"))?;

    let student_evaluation = storage
        .get_student_evaluation(group_evaluation.id, student.id)
        .await
        .or_respond(ErrorCode::StudentEvaluationNotFound, "查询学生评估失败")?
        .ok_or_else(|| {
            not_found(
                ErrorCode::StudentEvaluationNotFound,
                "Student evaluation not found",
            )
        })?;

    let changes = storage
        .list_student_evaluation_changes(student_evaluation.id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询等级变更记录失败")?;

    let intervals = build_timeline(group_evaluation.created_at, &changes, today());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentEvolutionResponse {
            student,
            group_evaluation_id: group_evaluation.id,
            student_evaluation_id: student_evaluation.id,
            classification: student_evaluation.classification,
            changes,
            intervals,
        },
        "Student evolution retrieved successfully",
    )))
}
