use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, targets_for};
use crate::models::{
    ApiResponse, ErrorCode,
    reports::{
        builders::target_rows, entities::EvaluationFactFilter, requests::CourseByCoreParams,
        responses::CourseByCoreReport,
    },
};
use crate::render::render_course_by_core;
use crate::services::{
    Flow, OrRespond, finish, load_group_in_scope, render_failure, user_and_scope,
    xlsx_attachment,
};

pub async fn course_by_core(
    service: &ReportService,
    request: &HttpRequest,
    params: CourseByCoreParams,
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

pub async fn export_course_by_core(
    service: &ReportService,
    request: &HttpRequest,
    params: CourseByCoreParams,
) -> ActixResult<HttpResponse> {
    finish(export_flow(service, request, params).await)
}

async fn export_flow(
    service: &ReportService,
    request: &HttpRequest,
    params: CourseByCoreParams,
) -> Flow<HttpResponse> {
    let report = build_report(service, request, params).await?;
    match render_course_by_core(&report) {
        Ok(buffer) => Ok(xlsx_attachment(
            &format!("group_{}_{}", report.group.id, report.core.as_str()),
            buffer,
        )),
        Err(e) => Err(render_failure(report, &e)),
    }
}

async fn build_report(
    service: &ReportService,
    request: &HttpRequest,
    params: CourseByCoreParams,
) -> Flow<CourseByCoreReport> {
    let storage = service.get_storage(request)?;
    let (_, scope) = user_and_scope(&storage, request).await?;
    let group = load_group_in_scope(&storage, &scope, params.group_id).await?;

    let targets = targets_for(&storage, params.core, group.level, params.learning_target_id).await?;

    let facts = storage
        .list_evaluation_facts(EvaluationFactFilter {
            school_id: Some(group.school_id),
            group_id: Some(group.id),
            core: Some(params.core),
            level: Some(group.level),
            learning_target_id: params.learning_target_id,
            ..Default::default()
        })
        .await
        .or_respond(ErrorCode::InternalServerError, "查询班组评估数据失败")?;

    let (rows, totals) = target_rows(&targets, &facts);

    Ok(CourseByCoreReport {
        group,
        core: params.core,
        core_name: params.core.display_name().to_string(),
        rows,
        totals,
    })
}
