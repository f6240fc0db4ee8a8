use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_evaluation_in_scope};
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        aggregation::{classification_counts, needs_remedial},
        responses::{EvaluationDetailResponse, GroupEvaluationSummary},
    },
};
use crate::services::{Flow, OrRespond, finish, not_found, today, user_and_scope};

pub async fn get_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_evaluation_flow(service, request, evaluation_id).await)
}

async fn get_evaluation_flow(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    load_evaluation_in_scope(&storage, &scope, evaluation_id).await?;

    let item = storage
        .get_evaluation_item(evaluation_id, today())
        .await
        .or_respond(ErrorCode::EvaluationNotFound, "查询评估任务失败")?
        .ok_or_else(|| not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"))?;

    let group_evaluations = storage
        .list_group_evaluations_by_evaluation(evaluation_id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组评估失败")?;

    let mut groups = Vec::with_capacity(group_evaluations.len());
    for group_evaluation in group_evaluations {
        let Some(group) = storage
            .get_group_by_id(group_evaluation.group_id)
            .await
            .or_respond(ErrorCode::InternalServerError, "查询班组失败")?
        else {
            continue;
        };
        // 教师只看到自己负责的班组
        if !scope.allows_group(group.id, group.school_id) {
            continue;
        }

        let student_evaluations = storage
            .list_student_evaluations(group_evaluation.id)
            .await
            .or_respond(ErrorCode::InternalServerError, "查询学生评估失败")?;
        let counts = classification_counts(&student_evaluations);
        let student_count = counts.total();

        groups.push(GroupEvaluationSummary {
            needs_remedial: needs_remedial(group_evaluation.status, &counts, student_count as u64),
            group_evaluation,
            group_name: group.name,
            student_count,
            counts,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EvaluationDetailResponse {
            evaluation: item,
            groups,
        },
        "Evaluation retrieved successfully",
    )))
}
