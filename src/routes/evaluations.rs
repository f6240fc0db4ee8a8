use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, EvaluationListParams, UpdateEvaluationRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EvaluationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

pub async fn list_evaluations(
    req: HttpRequest,
    query: web::Query<EvaluationListParams>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluations(&req, query.into_inner())
        .await
}

pub async fn create_evaluation(
    req: HttpRequest,
    evaluation_data: web::Json<CreateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .create_evaluation(&req, evaluation_data.into_inner())
        .await
}

pub async fn get_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_evaluation(&req, evaluation_id.0).await
}

pub async fn update_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
    update_data: web::Json<UpdateEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .update_evaluation(&req, evaluation_id.0, update_data.into_inner())
        .await
}

pub async fn delete_evaluation(
    req: HttpRequest,
    evaluation_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .delete_evaluation(&req, evaluation_id.0)
        .await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_evaluations))
                    .route(
                        web::post()
                            .to(create_evaluation)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_creator_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_evaluation))
                    .route(
                        web::put()
                            .to(update_evaluation)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_creator_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_evaluation)
                            // 级联删除全部评分数据，仅限协调员与管理员
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            ),
    );
}
