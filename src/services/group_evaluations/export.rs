//! 班组评估评分表导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GroupEvaluationService, detail::build_detail};
use crate::models::evaluations::{aggregation::classification_counts, entities::StudentEvaluation};
use crate::render::render_group_evaluation;
use crate::services::{Flow, finish, render_failure, user_and_scope, xlsx_attachment};

pub async fn export_group_evaluation(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(export_group_evaluation_flow(service, request, group_evaluation_id).await)
}

async fn export_group_evaluation_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    let detail = build_detail(&storage, &user, &scope, group_evaluation_id).await?;

    let student_evaluations: Vec<StudentEvaluation> = detail
        .students
        .iter()
        .map(|row| row.student_evaluation.clone())
        .collect();
    let counts = classification_counts(&student_evaluations);

    match render_group_evaluation(&detail, &counts) {
        Ok(buffer) => Ok(xlsx_attachment(
            &format!("group_evaluation_{group_evaluation_id}"),
            buffer,
        )),
        Err(e) => Err(render_failure(detail, &e)),
    }
}
