use serde::Deserialize;
use ts_rs::TS;

use super::entities::DEFAULT_OBSERVATION_MINUTES;
use crate::models::common::PaginationQuery;

fn default_observation_time() -> i32 {
    DEFAULT_OBSERVATION_MINUTES
}

// 新建轶事记录（教师）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct CreateAnecdotalRecordRequest {
    pub student_id: i64,
    pub activity_id: Option<i64>,
    #[serde(default = "default_observation_time")]
    pub observation_time: i32,
    pub observation_source: String,
    #[serde(default)]
    pub observed_behaviour: String,
    #[serde(default)]
    pub interpretation: String,
    pub image_url: Option<String>,
}

// 更新轶事记录；`comments` 只接受协调员提交
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct UpdateAnecdotalRecordRequest {
    pub activity_id: Option<i64>,
    pub observation_time: Option<i32>,
    pub observation_source: Option<String>,
    pub observed_behaviour: Option<String>,
    pub interpretation: Option<String>,
    pub comments: Option<String>,
    pub image_url: Option<String>,
}

// 有记录的学生列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct StudentsWithRecordsParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 有记录的学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentsWithRecordsQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
