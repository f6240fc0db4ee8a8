pub mod create;
pub mod delete;
pub mod list;
pub mod students;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{Flow, OrRespond, bad_request};
use crate::models::ErrorCode;
use crate::models::groups::requests::{CreateGroupRequest, GroupListParams, UpdateGroupRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

define_service!(GroupService);

impl GroupService {
    pub async fn list_groups(
        &self,
        request: &HttpRequest,
        query: GroupListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_groups(self, request, query).await
    }

    pub async fn create_group(
        &self,
        request: &HttpRequest,
        group_data: CreateGroupRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, request, group_data).await
    }

    pub async fn update_group(
        &self,
        request: &HttpRequest,
        group_id: i64,
        update_data: UpdateGroupRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_group(self, request, group_id, update_data).await
    }

    pub async fn delete_group(
        &self,
        request: &HttpRequest,
        group_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group(self, request, group_id).await
    }

    pub async fn list_group_students(
        &self,
        request: &HttpRequest,
        group_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::list_group_students(self, request, group_id).await
    }

    pub async fn add_group_student(
        &self,
        request: &HttpRequest,
        group_id: i64,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        students::add_group_student(self, request, group_id, student_data).await
    }
}

/// 负责教师必须是同校的教师账号
async fn ensure_responsible_professor(
    storage: &Arc<dyn Storage>,
    school_id: i64,
    professor_id: i64,
) -> Flow<()> {
    let professor = storage
        .get_user_by_id(professor_id)
        .await
        .or_respond(ErrorCode::UserNotFound, "查询负责教师失败")?;

    match professor {
        Some(user) if user.role == UserRole::Professor && user.school_id == Some(school_id) => {
            Ok(())
        }
        _ => Err(bad_request(
            ErrorCode::ValidationFailed,
            "Responsible professor must be a professor of the same school",
        )),
    }
}
