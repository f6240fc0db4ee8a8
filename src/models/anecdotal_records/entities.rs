use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 默认观察时长（分钟）
pub const DEFAULT_OBSERVATION_MINUTES: i32 = 5;

// 轶事记录：对学生行为的文字观察，与评分流程无关
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct AnecdotalRecord {
    pub id: i64,
    pub student_id: i64,
    pub activity_id: Option<i64>,
    pub created_by: Option<i64>,
    /// 观察时长（分钟）
    pub observation_time: i32,
    pub observation_source: String,
    pub observed_behaviour: String,
    pub interpretation: String,
    /// 仅协调员可填写
    pub comments: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
