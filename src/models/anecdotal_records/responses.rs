use serde::Serialize;
use ts_rs::TS;

use super::entities::AnecdotalRecord;
use crate::models::PaginationInfo;
use crate::models::students::entities::Student;

// 至少有一条有效记录的学生
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct StudentWithRecords {
    pub student: Student,
    pub group_name: String,
    pub record_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct StudentsWithRecordsResponse {
    pub items: Vec<StudentWithRecords>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/anecdotal_record.ts")]
pub struct StudentRecordsResponse {
    pub student: Student,
    pub records: Vec<AnecdotalRecord>,
}
