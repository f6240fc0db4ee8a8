use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupEvaluationService;
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::responses::{GroupEvaluationDetailResponse, StudentEvaluationRow},
    students::entities::Student,
    users::{entities::User, scope::AccessScope},
};
use crate::services::{
    Flow, OrRespond, finish, load_group_evaluation_in_scope, not_found, user_and_scope,
};
use crate::storage::Storage;

pub async fn get_group_evaluation(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_group_evaluation_flow(service, request, group_evaluation_id).await)
}

async fn get_group_evaluation_flow(
    service: &GroupEvaluationService,
    request: &HttpRequest,
    group_evaluation_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = user_and_scope(&storage, request).await?;
    let detail = build_detail(&storage, &user, &scope, group_evaluation_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Group evaluation retrieved successfully",
    )))
}

/// 组装评分页数据：教案按改写优先解析，学生按名单序号排列
pub(super) async fn build_detail(
    storage: &Arc<dyn Storage>,
    user: &User,
    scope: &AccessScope,
    group_evaluation_id: i64,
) -> Flow<GroupEvaluationDetailResponse> {
    let (group_evaluation, group) =
        load_group_evaluation_in_scope(storage, scope, group_evaluation_id).await?;

    let evaluation = storage
        .get_evaluation_by_id(group_evaluation.evaluation_id)
        .await
        .or_respond(ErrorCode::EvaluationNotFound, "查询评估任务失败")?
        .ok_or_else(|| not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"))?;

    let activity = storage
        .get_activity_by_id(evaluation.activity_id)
        .await
        .or_respond(ErrorCode::ActivityNotFound, "查询活动失败")?
        .ok_or_else(|| not_found(ErrorCode::ActivityNotFound, "Activity not found"))?;

    let learning_target = storage
        .get_learning_target_by_id(activity.learning_target_id)
        .await
        .or_respond(ErrorCode::LearningTargetNotFound, "查询学习目标失败")?
        .ok_or_else(|| not_found(ErrorCode::LearningTargetNotFound, "Learning target not found"))?;

    let student_evaluations = storage
        .list_student_evaluations(group_evaluation.id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学生评估失败")?;

    let mut students: HashMap<i64, Student> = storage
        .list_students_by_group(group.id)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组学生失败")?
        .into_iter()
        .map(|student| (student.id, student))
        .collect();

    // 已转班的学生仍保留在本次评估中
    for student_evaluation in &student_evaluations {
        if students.contains_key(&student_evaluation.student_id) {
            continue;
        }
        if let Some(student) = storage
            .get_student_by_id(student_evaluation.student_id)
            .await
            .or_respond(ErrorCode::InternalServerError, "查询学生失败")?
        {
            students.insert(student.id, student);
        }
    }

    let mut rows: Vec<StudentEvaluationRow> = student_evaluations
        .into_iter()
        .filter_map(|student_evaluation| {
            let student = students.get(&student_evaluation.student_id)?;
            Some(StudentEvaluationRow {
                student_name: student.full_name(),
                list_number: student.list_number,
                classification_name: student_evaluation
                    .classification
                    .display_name()
                    .to_string(),
                student_evaluation,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.list_number
            .cmp(&b.list_number)
            .then_with(|| a.student_name.cmp(&b.student_name))
    });

    Ok(GroupEvaluationDetailResponse {
        status_label: group_evaluation.status.display_name().to_string(),
        lesson_plan: group_evaluation.overrides.resolve(&activity.lesson_plan),
        can_edit_experience: user.professor_experience_enabled,
        group_evaluation,
        group,
        evaluation,
        activity,
        learning_target,
        students: rows,
    })
}
