//! 报表：学生-学习目标、班组-核心领域、学生-核心领域
//!
//! 只统计已提交的班组评估。每个报表都提供 JSON 与 xlsx 两种输出。

pub mod course_by_core;
pub mod student_by_core;
pub mod student_by_target;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{Flow, OrRespond, not_found};
use crate::models::ErrorCode;
use crate::models::groups::entities::GroupLevel;
use crate::models::learning_targets::entities::{Core, LearningTarget};
use crate::models::learning_targets::requests::LearningTargetListParams;
use crate::models::reports::requests::{
    CourseByCoreParams, StudentByCoreParams, StudentByTargetParams,
};
use crate::storage::Storage;

define_service!(ReportService);

impl ReportService {
    pub async fn student_by_target(
        &self,
        request: &HttpRequest,
        params: StudentByTargetParams,
    ) -> ActixResult<HttpResponse> {
        student_by_target::student_by_target(self, request, params).await
    }

    pub async fn export_student_by_target(
        &self,
        request: &HttpRequest,
        params: StudentByTargetParams,
    ) -> ActixResult<HttpResponse> {
        student_by_target::export_student_by_target(self, request, params).await
    }

    pub async fn course_by_core(
        &self,
        request: &HttpRequest,
        params: CourseByCoreParams,
    ) -> ActixResult<HttpResponse> {
        course_by_core::course_by_core(self, request, params).await
    }

    pub async fn export_course_by_core(
        &self,
        request: &HttpRequest,
        params: CourseByCoreParams,
    ) -> ActixResult<HttpResponse> {
        course_by_core::export_course_by_core(self, request, params).await
    }

    pub async fn student_by_core(
        &self,
        request: &HttpRequest,
        params: StudentByCoreParams,
    ) -> ActixResult<HttpResponse> {
        student_by_core::student_by_core(self, request, params).await
    }

    pub async fn export_student_by_core(
        &self,
        request: &HttpRequest,
        params: StudentByCoreParams,
    ) -> ActixResult<HttpResponse> {
        student_by_core::export_student_by_core(self, request, params).await
    }
}

/// 班组等级下某个核心领域的学习目标；指定目标时只保留该目标
async fn targets_for(
    storage: &Arc<dyn Storage>,
    core: Core,
    level: GroupLevel,
    learning_target_id: Option<i64>,
) -> Flow<Vec<LearningTarget>> {
    let targets = storage
        .list_learning_targets(LearningTargetListParams {
            core: Some(core),
            level: Some(level),
        })
        .await
        .or_respond(ErrorCode::InternalServerError, "查询学习目标失败")?;

    match learning_target_id {
        None => Ok(targets),
        Some(target_id) => {
            let selected: Vec<LearningTarget> = targets
                .into_iter()
                .filter(|target| target.id == target_id)
                .collect();
            if selected.is_empty() {
                return Err(not_found(
                    ErrorCode::LearningTargetNotFound,
                    "Learning target not found for this core and level",
                ));
            }
            Ok(selected)
        }
    }
}
