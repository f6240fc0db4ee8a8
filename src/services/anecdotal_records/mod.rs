pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{Flow, OrRespond, bad_request, load_student_in_scope, not_found};
use crate::models::ErrorCode;
use crate::models::anecdotal_records::entities::AnecdotalRecord;
use crate::models::anecdotal_records::requests::{
    CreateAnecdotalRecordRequest, StudentsWithRecordsParams, UpdateAnecdotalRecordRequest,
};
use crate::models::users::scope::AccessScope;
use crate::storage::Storage;

define_service!(AnecdotalRecordService);

impl AnecdotalRecordService {
    // 至少有一条记录的学生
    pub async fn list_students_with_records(
        &self,
        request: &HttpRequest,
        query: StudentsWithRecordsParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students_with_records(self, request, query).await
    }

    // 某个学生的全部有效记录
    pub async fn list_student_records(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_records(self, request, student_id).await
    }

    pub async fn create_record(
        &self,
        request: &HttpRequest,
        record_data: CreateAnecdotalRecordRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_record(self, request, record_data).await
    }

    pub async fn get_record(&self, request: &HttpRequest, record_id: i64) -> ActixResult<HttpResponse> {
        get::get_record(self, request, record_id).await
    }

    pub async fn update_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
        update_data: UpdateAnecdotalRecordRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_record(self, request, record_id, update_data).await
    }

    pub async fn delete_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_record(self, request, record_id).await
    }
}

/// 加载有效记录，并确认其学生在可见范围内
async fn load_record_in_scope(
    storage: &Arc<dyn Storage>,
    scope: &AccessScope,
    record_id: i64,
) -> Flow<AnecdotalRecord> {
    let record = storage
        .get_anecdotal_record_by_id(record_id)
        .await
        .or_respond(ErrorCode::AnecdotalRecordNotFound, "查询轶事记录失败")?
        .ok_or_else(|| {
            not_found(
                ErrorCode::AnecdotalRecordNotFound,
                "Anecdotal record not found",
            )
        })?;

    load_student_in_scope(storage, scope, record.student_id).await?;
    Ok(record)
}

/// 关联的活动必须存在
async fn ensure_activity(storage: &Arc<dyn Storage>, activity_id: Option<i64>) -> Flow<()> {
    let Some(activity_id) = activity_id else {
        return Ok(());
    };
    storage
        .get_activity_by_id(activity_id)
        .await
        .or_respond(ErrorCode::ActivityNotFound, "查询活动失败")?
        .map(|_| ())
        .ok_or_else(|| not_found(ErrorCode::ActivityNotFound, "Activity not found"))
}

fn ensure_observation_time(minutes: i32, code: ErrorCode) -> Flow<()> {
    if minutes < 1 {
        return Err(bad_request(code, "Observation time must be at least one minute"));
    }
    Ok(())
}
