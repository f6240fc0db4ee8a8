use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    learning_targets::requests::{ActivityListParams, ActivityListQuery, CreateActivityRequest},
};
use crate::services::{Flow, OrRespond, bad_request, finish, not_found};

pub async fn list_activities(
    service: &CatalogService,
    request: &HttpRequest,
    query: ActivityListParams,
) -> ActixResult<HttpResponse> {
    finish(list_activities_flow(service, request, query).await)
}

async fn list_activities_flow(
    service: &CatalogService,
    request: &HttpRequest,
    query: ActivityListParams,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = ActivityListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        learning_target_id: query.learning_target_id,
        search: query.search,
    };

    let response = storage
        .list_activities_with_pagination(list_query)
        .await
        .or_respond(ErrorCode::InternalServerError, "查询活动列表失败")?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Activity list retrieved successfully",
    )))
}

pub async fn create_activity(
    service: &CatalogService,
    request: &HttpRequest,
    activity_data: CreateActivityRequest,
) -> ActixResult<HttpResponse> {
    finish(create_activity_flow(service, request, activity_data).await)
}

async fn create_activity_flow(
    service: &CatalogService,
    request: &HttpRequest,
    mut activity_data: CreateActivityRequest,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    activity_data.code = activity_data.code.trim().to_string();
    if activity_data.code.is_empty() {
        return Err(bad_request(
            ErrorCode::ActivityCreationFailed,
            "Activity code must not be empty",
        ));
    }

    storage
        .get_learning_target_by_id(activity_data.learning_target_id)
        .await
        .or_respond(ErrorCode::LearningTargetNotFound, "查询学习目标失败")?
        .ok_or_else(|| not_found(ErrorCode::LearningTargetNotFound, "Learning target not found"))?;

    let activity = storage
        .create_activity(activity_data)
        .await
        .or_respond(ErrorCode::ActivityCreationFailed, "创建活动失败")?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        activity,
        "Activity created successfully",
    )))
}

pub async fn get_activity(
    service: &CatalogService,
    request: &HttpRequest,
    activity_id: i64,
) -> ActixResult<HttpResponse> {
    finish(get_activity_flow(service, request, activity_id).await)
}

async fn get_activity_flow(
    service: &CatalogService,
    request: &HttpRequest,
    activity_id: i64,
) -> Flow<HttpResponse> {
    let storage = service.get_storage(request)?;

    let activity = storage
        .get_activity_by_id(activity_id)
        .await
        .or_respond(ErrorCode::ActivityNotFound, "查询活动失败")?
        .ok_or_else(|| not_found(ErrorCode::ActivityNotFound, "Activity not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        activity,
        "Activity retrieved successfully",
    )))
}
