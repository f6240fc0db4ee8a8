use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub rut: String,
    pub list_number: i32,
    pub birth_date: Option<chrono::NaiveDate>,
}

/// 学生更新请求；修改 `group_id` 即为转班
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub group_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub rut: Option<String>,
    pub list_number: Option<i32>,
    pub birth_date: Option<chrono::NaiveDate>,
}
