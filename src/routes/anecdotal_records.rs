use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::anecdotal_records::requests::{
    CreateAnecdotalRecordRequest, StudentsWithRecordsParams, UpdateAnecdotalRecordRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AnecdotalRecordService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static ANECDOTAL_RECORD_SERVICE: Lazy<AnecdotalRecordService> =
    Lazy::new(AnecdotalRecordService::new_lazy);

pub async fn list_students_with_records(
    req: HttpRequest,
    query: web::Query<StudentsWithRecordsParams>,
) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE
        .list_students_with_records(&req, query.into_inner())
        .await
}

pub async fn list_student_records(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE
        .list_student_records(&req, student_id.0)
        .await
}

pub async fn create_record(
    req: HttpRequest,
    record_data: web::Json<CreateAnecdotalRecordRequest>,
) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE
        .create_record(&req, record_data.into_inner())
        .await
}

pub async fn get_record(req: HttpRequest, record_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE.get_record(&req, record_id.0).await
}

pub async fn update_record(
    req: HttpRequest,
    record_id: SafeIDI64,
    update_data: web::Json<UpdateAnecdotalRecordRequest>,
) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE
        .update_record(&req, record_id.0, update_data.into_inner())
        .await
}

pub async fn delete_record(req: HttpRequest, record_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANECDOTAL_RECORD_SERVICE.delete_record(&req, record_id.0).await
}

// 配置路由
pub fn configure_anecdotal_record_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/anecdotal-records")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .service(
                        web::resource("").route(web::post().to(create_record).wrap(
                            // 记录由教师撰写
                            middlewares::RequireRole::new_any(UserRole::professor_roles()),
                        )),
                    )
                    .route("/students", web::get().to(list_students_with_records))
                    .route("/students/{student_id}", web::get().to(list_student_records))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_record))
                            .route(web::put().to(update_record))
                            .route(web::delete().to(delete_record)),
                    ),
            ),
    );
}
