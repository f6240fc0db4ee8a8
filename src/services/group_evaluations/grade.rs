use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GroupEvaluationService;
use crate::models::{
    ApiResponse, ErrorCode, evaluations::requests::GradeGroupEvaluationRequest,
};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, user_and_scope,
};

pub async fn grade_group_evaluation(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
    grading: GradeGroupEvaluationRequest,
) -> ActixResult<HttpResponse> {
    finish(grade_group_evaluation_flow(service, request, group_evaluation_id, grading).await)
}

async fn grade_group_evaluation_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
    mut grading: GradeGroupEvaluationRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    load_group_evaluation_in_scope(&storage, &scope, group_evaluation_id).await?;

    // 未开启教学经验选项的用户不能改写开始/发展/结束环节
    if !user.professor_experience_enabled {
        grading.overrides = grading
            .overrides
            .map(|overrides| overrides.without_experience_fields());
    }

    let outcome = storage
        .grade_group_evaluation(group_evaluation_id, grading)
        .await
        .or_respond(ErrorCode::GradingFailed, "保存评分失败")?;

    info!(
        "用户 {} 为班组评估 {} 评分：更新 {} 条，记录 {} 次等级变更",
        user.id, group_evaluation_id, outcome.updated, outcome.changes_recorded
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        outcome,
        "Grades saved successfully",
    )))
}
