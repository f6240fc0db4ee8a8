pub mod delete;
pub mod detail;
pub mod evolution;
pub mod export;
pub mod finalize;
pub mod grade;
pub mod list;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::evaluations::requests::{GradeGroupEvaluationRequest, GroupEvaluationListParams};

define_service!(
    /// 班组评估：评分、提交与统计
    GroupEvaluationService
);

impl GroupEvaluationService {
    // 班组评估列表（教师只看到自己的班组）
    pub async fn list_group_evaluations(
        &self,
        request: &HttpRequest,
        query: GroupEvaluationListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_group_evaluations(self, request, query).await
    }

    // 评分页：教案与学生评估
    pub async fn get_group_evaluation(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_group_evaluation(self, request, group_evaluation_id).await
    }

    // 批量评分
    pub async fn grade_group_evaluation(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
        grading: GradeGroupEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_group_evaluation(self, request, group_evaluation_id, grading).await
    }

    // 提交
    pub async fn finalize_group_evaluation(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        finalize::finalize_group_evaluation(self, request, group_evaluation_id).await
    }

    pub async fn delete_group_evaluation(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group_evaluation(self, request, group_evaluation_id).await
    }

    pub async fn get_group_evaluation_stats(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        stats::get_group_evaluation_stats(self, request, group_evaluation_id).await
    }

    // 学生等级变化轨迹
    pub async fn get_student_evolution(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        evolution::get_student_evolution(self, request, group_evaluation_id, student_id).await
    }

    // 导出评分表
    pub async fn export_group_evaluation(
        &self,
        request: &HttpRequest,
        group_evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        export::export_group_evaluation(self, request, group_evaluation_id).await
    }
}
