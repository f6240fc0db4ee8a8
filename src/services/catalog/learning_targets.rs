use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    learning_targets::requests::{CreateLearningTargetRequest, LearningTargetListParams},
};
use crate::services::{Flow, OrRespond, bad_request, finish, not_found};

pub async fn list_learning_targets(
    service: &CatalogService,
    request: &HttpRequest,
    query: LearningTargetListParams,
) -> ActixResult<HttpResponse> {
    finish(list_learning_targets_flow(service, request, query).await)
}

async fn list_learning_targets_flow(
    service: &CatalogService,
    request: &HttpRequest,
    query: LearningTargetListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let targets = storage
        .list_learning_targets(query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学习目标失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        targets,
        "Learning targets retrieved successfully",
    )))
}

pub async fn create_learning_target(
    service: &CatalogService,
    request: &HttpRequest,
    target_data: CreateLearningTargetRequest,
) -> ActixResult<HttpResponse> {
    finish(create_learning_target_flow(service, request, target_data).await)
}

async fn create_learning_target_flow(
    service: &CatalogService,
    request: &HttpRequest,
    mut target_data: CreateLearningTargetRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    target_data.name = target_data.name.trim().to_string();
    target_data.abbreviated_name = target_data.abbreviated_name.trim().to_string();
    if target_data.name.is_empty() || target_data.identifier < 1 {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            "Learning target requires a name and a positive identifier",
        ));
    }

    let target = storage
        .create_learning_target(target_data)
        .await
        .or_respond(ErrorCode::InternalServerError, "创建学习目标失败")?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        target,
        "Learning target created successfully",
    )))
}

pub async fn get_learning_target(
    service: &CatalogService,
    request: &HttpRequest,
    target_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_learning_target_flow(service, request, target_id).await)
}

async fn get_learning_target_flow(
    service: &CatalogService,
    request: &HttpRequest,
    target_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let target = storage
        .get_learning_target_by_id(target_id)
        .await
        .or_respond(ErrorCode::LearningTargetNotFound, "查询学习目标失败")?
        .ok_or_else(|| not_found(ErrorCode::LearningTargetNotFound, "Learning target not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        target,
        "Learning target retrieved successfully",
    )))
}
