use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupEvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        aggregation::{classification_counts, needs_remedial, remedial_percent},
        responses::GroupEvaluationStatsResponse,
    },
};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, user_and_scope,
};

pub async fn get_group_evaluation_stats(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_group_evaluation_stats_flow(service, request, group_evaluation_id).await)
}

async fn get_group_evaluation_stats_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (group_evaluation, _) =
        load_group_evaluation_in_scope(&storage, &scope, group_evaluation_id).await?;

    let student_evaluations = storage
        .list_student_evaluations(group_evaluation.id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学生评估失败")?;

    let counts = classification_counts(&student_evaluations);
    let total_students = counts.total();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GroupEvaluationStatsResponse {
            group_evaluation_id: group_evaluation.id,
            status: group_evaluation.status.display_name().to_string(),
            total_students,
            needs_remedial: needs_remedial(group_evaluation.status, &counts, total_students as u64),
            remedial_percent: remedial_percent(&counts, total_students as u64),
            counts,
        },
        "Group evaluation statistics retrieved successfully",
    )))
}
