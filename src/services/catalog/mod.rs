pub mod activities;
pub mod learning_targets;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::learning_targets::requests::{
    ActivityListParams, CreateActivityRequest, CreateLearningTargetRequest,
    LearningTargetListParams,
};

define_service!(
    /// 课程目录：学习目标与活动
    CatalogService
);

impl CatalogService {
    pub async fn list_learning_targets(
        &self,
        request: &HttpRequest,
        query: LearningTargetListParams,
    ) -> ActixResult<HttpResponse> {
        learning_targets::list_learning_targets(self, request, query).await
    }

    pub async fn create_learning_target(
        &self,
        request: &HttpRequest,
        target_data: CreateLearningTargetRequest,
    ) -> ActixResult<HttpResponse> {
        learning_targets::create_learning_target(self, request, target_data).await
    }

    pub async fn get_learning_target(
        &self,
        request: &HttpRequest,
        target_id: i64,
    ) -> ActixResult<HttpResponse> {
        learning_targets::get_learning_target(self, request, target_id).await
    }

    pub async fn list_activities(
        &self,
        request: &HttpRequest,
        query: ActivityListParams,
    ) -> ActixResult<HttpResponse> {
        activities::list_activities(self, request, query).await
    }

    pub async fn create_activity(
        &self,
        request: &HttpRequest,
        activity_data: CreateActivityRequest,
    ) -> ActixResult<HttpResponse> {
        activities::create_activity(self, request, activity_data).await
    }

    pub async fn get_activity(
        &self,
        request: &HttpRequest,
        activity_id: i64,
    ) -> ActixResult<HttpResponse> {
        activities::get_activity(self, request, activity_id).await
    }
}
