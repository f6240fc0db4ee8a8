use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluations::requests::{
    GradeGroupEvaluationRequest, GroupEvaluationListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::GroupEvaluationService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 GroupEvaluationService 实例
static GROUP_EVALUATION_SERVICE: Lazy<GroupEvaluationService> =
    Lazy::new(GroupEvaluationService::new_lazy);

pub async fn list_group_evaluations(
    req: HttpRequest,
    query: web::Query<GroupEvaluationListParams>,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .list_group_evaluations(&req, query.into_inner())
        .await
}

pub async fn get_group_evaluation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE.get_group_evaluation(&req, id.0).await
}

pub async fn grade_group_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
    grading: web::Json<GradeGroupEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .grade_group_evaluation(&req, id.0, grading.into_inner())
        .await
}

pub async fn finalize_group_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .finalize_group_evaluation(&req, id.0)
        .await
}

pub async fn delete_group_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .delete_group_evaluation(&req, id.0)
        .await
}

pub async fn get_group_evaluation_stats(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .get_group_evaluation_stats(&req, id.0)
        .await
}

pub async fn get_student_evolution(
    req: HttpRequest,
    id: SafeIDI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .get_student_evolution(&req, id.0, student_id.0)
        .await
}

pub async fn export_group_evaluation(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GROUP_EVALUATION_SERVICE
        .export_group_evaluation(&req, id.0)
        .await
}

// 配置路由
pub fn configure_group_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/group-evaluations")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_group_evaluations))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_group_evaluation))
                    .route(
                        web::put()
                            .to(grade_group_evaluation)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_group_evaluation)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{id}/finalize").route(
                    web::post()
                        .to(finalize_group_evaluation)
                        // 草稿 → 已提交
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .route("/{id}/stats", web::get().to(get_group_evaluation_stats))
            .route("/{id}/export", web::get().to(export_group_evaluation))
            .route(
                "/{id}/students/{student_id}/evolution",
                web::get().to(get_student_evolution),
            ),
    );
}
