pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{Flow, OrRespond, not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::evaluations::entities::GeneralEvaluation;
use crate::models::evaluations::requests::{
    CreateEvaluationRequest, EvaluationListParams, UpdateEvaluationRequest,
};
use crate::models::users::scope::AccessScope;
use crate::storage::Storage;

define_service!(
    /// 评估任务（作业）
    EvaluationService
);

impl EvaluationService {
    pub async fn list_evaluations(
        &self,
        request: &HttpRequest,
        query: EvaluationListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_evaluations(self, request, query).await
    }

    pub async fn create_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_data: CreateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_evaluation(self, request, evaluation_data).await
    }

    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_evaluation(self, request, evaluation_id).await
    }

    pub async fn update_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        update_data: UpdateEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_evaluation(self, request, evaluation_id, update_data).await
    }

    pub async fn delete_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_evaluation(self, request, evaluation_id).await
    }
}

/// 加载当前学校内的有效评估任务
async fn load_evaluation_in_scope(
    storage: &Arc<dyn Storage>,
    scope: &AccessScope,
    evaluation_id: i64,
) -> Flow<GeneralEvaluation> {
    let evaluation = storage
        .get_evaluation_by_id(evaluation_id)
        .await
        .or_respond(ErrorCode::EvaluationNotFound, "查询评估任务失败")?
        .filter(|evaluation| evaluation.active)
        .ok_or_else(|| not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"))?;

    if !scope.allows_school(evaluation.school_id) {
        return Err(not_found(ErrorCode::EvaluationNotFound, "Evaluation not found"));
    }
    Ok(evaluation)
}

/// 教师只能选择自己负责的班组
fn ensure_groups_selectable<'a>(
    scope: &AccessScope,
    group_ids: impl IntoIterator<Item = &'a i64>,
) -> Flow<()> {
    let Some(allowed) = scope.group_ids() else {
        return Ok(());
    };
    let outside: Vec<String> = group_ids
        .into_iter()
        .filter(|id| !allowed.contains(id))
        .map(|id| id.to_string())
        .collect();
    if outside.is_empty() {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::InvalidGroupSelection,
            format!("Groups outside of your scope: {}", outside.join(", ")),
        )))
    }
}

/// 活动必须存在
async fn ensure_activity_exists(storage: &Arc<dyn Storage>, activity_id: i64) -> Flow<()> {
    storage
        .get_activity_by_id(activity_id)
        .await
        .or_respond(ErrorCode::ActivityNotFound, "查询活动失败")?
        .map(|_| ())
        .ok_or_else(|| not_found(ErrorCode::ActivityNotFound, "Activity not found"))
}
