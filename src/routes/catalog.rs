use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::learning_targets::requests::{
    ActivityListParams, CreateActivityRequest, CreateLearningTargetRequest,
    LearningTargetListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::CatalogService;
use crate::utils::SafeIDI64;

static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_learning_targets(
    req: HttpRequest,
    query: web::Query<LearningTargetListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .list_learning_targets(&req, query.into_inner())
        .await
}

pub async fn create_learning_target(
    req: HttpRequest,
    target_data: web::Json<CreateLearningTargetRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_learning_target(&req, target_data.into_inner())
        .await
}

pub async fn get_learning_target(
    req: HttpRequest,
    target_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_learning_target(&req, target_id.0).await
}

pub async fn list_activities(
    req: HttpRequest,
    query: web::Query<ActivityListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_activities(&req, query.into_inner()).await
}

pub async fn create_activity(
    req: HttpRequest,
    activity_data: web::Json<CreateActivityRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_activity(&req, activity_data.into_inner())
        .await
}

pub async fn get_activity(req: HttpRequest, activity_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_activity(&req, activity_id.0).await
}

// 配置路由
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/learning-targets")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_learning_targets))
                    .route(
                        web::post()
                            .to(create_learning_target)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            )
            .route("/{id}", web::get().to(get_learning_target)),
    );
    cfg.service(
        web::scope("/api/v1/activities")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_activities))
                    .route(
                        web::post()
                            .to(create_activity)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            )
            .route("/{id}", web::get().to(get_activity)),
    );
}
