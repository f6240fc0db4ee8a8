use std::collections::BTreeSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{
    ApiResponse, ErrorCode,
    reports::{
        builders::{average_value, student_target_entries},
        entities::EvaluationFactFilter,
        requests::StudentByTargetParams,
        responses::StudentByTargetReport,
    },
};
use crate::render::render_student_by_target;
use crate::services::{
    Flow, OrRespond, finish, load_student_in_scope, not_found, render_failure, user_and_scope,
    xlsx_attachment,
};

pub async fn student_by_target(
    service: &ReportService,
    request: &HttpRequest,
    params: StudentByTargetParams,
) -> ActixResult<HttpResponse> {
    finish(
        build_report(service, request, params)
            .await
            .map(|report| {
                HttpResponse::Ok().json(ApiResponse::success(
                    report,
                    "Report generated successfully",
                ))
            }),
    )
}

pub async fn export_student_by_target(
    service: &ReportService,
    request: &HttpRequest,
    params: StudentByTargetParams,
) -> ActixResult<HttpResponse> {
    finish(export_flow(service, request, params).await)
}

async fn export_flow(
    service: &ReportService,
    request: &HttpRequest,
    params: StudentByTargetParams,
) -> Flow<HttpResponse> {
    let report = build_report(service, request, params).await?;
    match render_student_by_target(&report) {
        Ok(buffer) => Ok(xlsx_attachment(
            &format!("student_{}_by_target", report.student.id),
            buffer,
        )),
        Err(e) => Err(render_failure(report, &e)),
    }
}

async fn build_report(
    service: &ReportService,
    request: &HttpRequest,
    params: StudentByTargetParams,
) -> Flow<StudentByTargetReport> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let (student, group) = load_student_in_scope(&storage, &scope, params.student_id).await?;

    let target_label = match params.learning_target_id {
        Some(target_id) => {
            storage
                .get_learning_target_by_id(target_id)
                .await
                .or_respond(ErrorCode::LearningTargetNotFound, "查询学习目标失败")?
                .ok_or_else(|| {
                    not_found(ErrorCode::LearningTargetNotFound, "Learning target not found")
                })?
                .abbreviated_name
        }
        None => params.core.abbreviation().to_string(),
    };

    // 先找出学生参与的班组评估，再取这些评估的全体数据计算班组平均
    let own_facts = storage
        .list_evaluation_facts(EvaluationFactFilter {
            school_id: Some(group.school_id),
            student_id: Some(student.id),
            core: Some(params.core),
            learning_target_id: params.learning_target_id,
            ..Default::default()
        })
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学生评估失败")?;

    let group_evaluation_ids: BTreeSet<i64> =
        own_facts.iter().map(|fact| fact.group_evaluation_id).collect();

    let facts = if group_evaluation_ids.is_empty() {
        Vec::new()
    } else {
        storage
            .list_evaluation_facts(EvaluationFactFilter {
                school_id: Some(group.school_id),
                group_evaluation_ids: Some(group_evaluation_ids.into_iter().collect()),
                core: Some(params.core),
                learning_target_id: params.learning_target_id,
                ..Default::default()
            })
            .await
            .or_respond(ErrorCode::InternalServerError, "查询班组评估数据失败")?
    };

    let entries = student_target_entries(student.id, &facts);
    let student_average = average_value(entries.iter().map(|entry| entry.classification));
    let group_average = average_value(facts.iter().map(|fact| fact.classification));

    Ok(StudentByTargetReport {
        group_name: group.name,
        core: params.core,
        core_name: params.core.display_name().to_string(),
        target_label,
        entries,
        student_average,
        group_average,
        student,
    })
}
