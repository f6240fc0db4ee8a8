use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::{
    CourseByCoreParams, StudentByCoreParams, StudentByTargetParams,
};
use crate::services::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn student_by_target(
    req: HttpRequest,
    query: web::Query<StudentByTargetParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .student_by_target(&req, query.into_inner())
        .await
}

pub async fn export_student_by_target(
    req: HttpRequest,
    query: web::Query<StudentByTargetParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .export_student_by_target(&req, query.into_inner())
        .await
}

pub async fn course_by_core(
    req: HttpRequest,
    query: web::Query<CourseByCoreParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.course_by_core(&req, query.into_inner()).await
}

pub async fn export_course_by_core(
    req: HttpRequest,
    query: web::Query<CourseByCoreParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .export_course_by_core(&req, query.into_inner())
        .await
}

pub async fn student_by_core(
    req: HttpRequest,
    query: web::Query<StudentByCoreParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.student_by_core(&req, query.into_inner()).await
}

pub async fn export_student_by_core(
    req: HttpRequest,
    query: web::Query<StudentByCoreParams>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .export_student_by_core(&req, query.into_inner())
        .await
}

// 配置路由：所有角色可用，数据按访问范围过滤
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route("/student-by-target", web::get().to(student_by_target))
            .route(
                "/student-by-target/export",
                web::get().to(export_student_by_target),
            )
            .route("/course-by-core", web::get().to(course_by_core))
            .route(
                "/course-by-core/export",
                web::get().to(export_course_by_core),
            )
            .route("/student-by-core", web::get().to(student_by_core))
            .route(
                "/student-by-core/export",
                web::get().to(export_student_by_core),
            ),
    );
}
