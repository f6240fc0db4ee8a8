//! 业务逻辑层
//!
//! 每个业务区域一个服务结构体，每个操作一个文件。处理流程中的提前返回
//! 统一用 `Flow<T>`（`Err` 即为要直接返回给客户端的响应）。

/// 定义延迟取得存储实例的服务结构体
macro_rules! define_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            /// 使用指定的存储实例（测试用）
            pub fn with_storage(storage: std::sync::Arc<dyn $crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> $crate::services::Flow<std::sync::Arc<dyn $crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => $crate::services::storage_from_request(request),
                }
            }
        }
    };
}

pub mod anecdotal_records;
pub mod catalog;
pub mod evaluations;
pub mod group_evaluations;
pub mod groups;
pub mod reports;
pub mod schools;
pub mod students;
pub mod users;

pub use anecdotal_records::AnecdotalRecordService;
pub use catalog::CatalogService;
pub use evaluations::EvaluationService;
pub use group_evaluations::GroupEvaluationService;
pub use groups::GroupService;
pub use reports::ReportService;
pub use schools::SchoolService;
pub use students::StudentService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use tracing::error;

use crate::errors::ClassPointError;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::entities::GroupEvaluation;
use crate::models::groups::entities::Group;
use crate::models::students::entities::Student;
use crate::models::users::{entities::User, scope::AccessScope};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 处理流程：`Err` 为需要立即返回的响应
pub(crate) type Flow<T> = Result<T, HttpResponse>;

/// 把处理流程收束为 actix 处理结果
pub(crate) fn finish(flow: Flow<HttpResponse>) -> ActixResult<HttpResponse> {
    Ok(flow.unwrap_or_else(|response| response))
}

/// 业务错误对应的 HTTP 状态
pub(crate) fn status_for(err: &ClassPointError) -> StatusCode {
    match err {
        ClassPointError::NotFound(_) => StatusCode::NOT_FOUND,
        ClassPointError::Validation(_) | ClassPointError::DateParse(_) => StatusCode::BAD_REQUEST,
        ClassPointError::InvalidTransition(_) => StatusCode::CONFLICT,
        ClassPointError::Authorization(_) => StatusCode::FORBIDDEN,
        ClassPointError::Authentication(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(code: ErrorCode, context: &str, err: &ClassPointError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        error!("{}: {}", context, err.format_simple());
    }
    // 服务端错误统一使用内部错误码，客户端错误保留业务错误码
    let code = if status.is_server_error() {
        ErrorCode::InternalServerError
    } else {
        code
    };
    HttpResponse::build(status).json(ApiResponse::from_error(code, context, err))
}

pub(crate) trait OrRespond<T> {
    /// 将业务错误转换为响应
    fn or_respond(self, code: ErrorCode, context: &str) -> Flow<T>;
}

impl<T> OrRespond<T> for crate::errors::Result<T> {
    fn or_respond(self, code: ErrorCode, context: &str) -> Flow<T> {
        self.map_err(|e| error_response(code, context, &e))
    }
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

pub(crate) fn storage_from_request(request: &HttpRequest) -> Flow<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("应用数据中缺少存储实例");
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Storage not configured",
            ))
        })
}

/// xlsx 附件响应
pub(crate) fn xlsx_attachment(stem: &str, buffer: Vec<u8>) -> HttpResponse {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{stem}_{timestamp}.xlsx");
    HttpResponse::Ok()
        .content_type(crate::render::XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(buffer)
}

/// 渲染失败：返回 500，并附上已经算好的报表数据便于排查
pub(crate) fn render_failure<T>(document: T, err: &ClassPointError) -> HttpResponse
where
    T: serde::Serialize + ts_rs::TS,
{
    error!("生成电子表格失败: {}", err.format_simple());
    HttpResponse::InternalServerError().json(ApiResponse::error(
        ErrorCode::ReportRenderFailed,
        document,
        format!("Failed to render spreadsheet: {}", err.message()),
    ))
}

/// 派生状态使用的当天日期（UTC）
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 当前认证用户
pub(crate) fn current_user(request: &HttpRequest) -> Flow<User> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))
    })
}

/// 构造当前用户的访问范围；教师的范围为其负责的有效班组
pub(crate) async fn resolve_scope(storage: &Arc<dyn Storage>, user: &User) -> Flow<AccessScope> {
    let assigned = if user.role == crate::models::users::entities::UserRole::Professor {
        storage
            .list_group_ids_for_professor(user.id)
            .await
            .or_respond(ErrorCode::InternalServerError, "查询负责班组失败")?
    } else {
        Vec::new()
    };

    AccessScope::for_user(user, assigned).ok_or_else(|| {
        HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserWithoutSchool,
            "User is not assigned to a school",
        ))
    })
}

/// 当前用户及其访问范围
pub(crate) async fn user_and_scope(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Flow<(User, AccessScope)> {
    let user = current_user(request)?;
    let scope = resolve_scope(storage, &user).await?;
    Ok((user, scope))
}

/// 加载可见范围内的班组
pub(crate) async fn load_group_in_scope(
    storage: &Arc<dyn Storage>,
    scope: &AccessScope,
    group_id: i64,
) -> Flow<Group> {
    let group = storage
        .get_group_by_id(group_id)
        .await
        .or_respond(ErrorCode::GroupNotFound, "查询班组失败")?
        .ok_or_else(|| not_found(ErrorCode::GroupNotFound, "Group not found"))?;

    // 范围之外的班组按不存在处理
    if !scope.allows_group(group.id, group.school_id) {
        return Err(not_found(ErrorCode::GroupNotFound, "Group not found"));
    }
    Ok(group)
}

/// 加载可见范围内的学生及其班组
pub(crate) async fn load_student_in_scope(
    storage: &Arc<dyn Storage>,
    scope: &AccessScope,
    student_id: i64,
) -> Flow<(Student, Group)> {
    let student = storage
        .get_student_by_id(student_id)
        .await
        .or_respond(ErrorCode::StudentNotFound, "查询学生失败")?
        .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student not found"))?;

    let group = load_group_in_scope(storage, scope, student.group_id).await?;
    Ok((student, group))
}

/// 加载可见范围内的班组评估及其班组
pub(crate) async fn load_group_evaluation_in_scope(
    storage: &Arc<dyn Storage>,
    scope: &AccessScope,
    group_evaluation_id: i64,
) -> Flow<(GroupEvaluation, Group)> {
    let group_evaluation = storage
        .get_group_evaluation_by_id(group_evaluation_id)
        .await
        .or_respond(ErrorCode::GroupEvaluationNotFound, "查询班组评估失败")?
        .filter(|ge| ge.active)
        .ok_or_else(|| not_found(ErrorCode::GroupEvaluationNotFound, "Group evaluation not found"))?;

    let group = load_group_in_scope(storage, scope, group_evaluation.group_id).await?;
    Ok((group_evaluation, group))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_for(&ClassPointError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ClassPointError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ClassPointError::invalid_transition("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ClassPointError::authorization("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&ClassPointError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_business_code() {
        let response = error_response(
            ErrorCode::GradingFailed,
            "评分失败",
            &ClassPointError::database_operation("locked"),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = error_response(
            ErrorCode::GroupEvaluationAlreadySent,
            "提交失败",
            &ClassPointError::invalid_transition("sent"),
        );
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
