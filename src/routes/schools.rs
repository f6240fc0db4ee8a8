use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::models::users::entities::UserRole;
use crate::services::SchoolService;

static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);

pub async fn list_schools(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.list_schools(&req).await
}

pub async fn create_school(
    req: HttpRequest,
    school_data: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_school(&req, school_data.into_inner())
        .await
}

pub fn configure_school_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_schools))
                    .route("", web::post().to(create_school)),
            ),
    );
}
