use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{CreateGroupRequest, GroupListParams, UpdateGroupRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::services::GroupService;
use crate::utils::SafeIDI64;

// 懒加载的全局 GroupService 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListParams>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(&req, query.into_inner()).await
}

pub async fn create_group(
    req: HttpRequest,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(&req, group_data.into_inner()).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeIDI64,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(&req, group_id.0, update_data.into_inner())
        .await
}

pub async fn delete_group(req: HttpRequest, group_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(&req, group_id.0).await
}

pub async fn list_group_students(
    req: HttpRequest,
    group_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_group_students(&req, group_id.0).await
}

pub async fn add_group_student(
    req: HttpRequest,
    group_id: SafeIDI64,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .add_group_student(&req, group_id.0, student_data.into_inner())
        .await
}

// 配置路由
pub fn configure_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/groups")
            .wrap(middlewares::RequireJWT)
            .service(
                // 列表按访问范围过滤
                web::resource("").route(web::get().to(list_groups)).route(
                    web::post()
                        .to(create_group)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::evaluation_admin_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_group)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_group)
                            // 停用班组
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{id}/students")
                    .route(web::get().to(list_group_students))
                    .route(
                        web::post()
                            .to(add_group_student)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::evaluation_admin_roles(),
                            )),
                    ),
            ),
    );
}
