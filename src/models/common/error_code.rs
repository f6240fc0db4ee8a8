use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 接口错误码
///
/// 0 表示成功；1xxx 为通用错误，其余按业务区域划分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,

    // 学校与用户
    SchoolNotFound = 2000,
    SchoolCreationFailed = 2001,
    UserNotFound = 2100,
    UserCreationFailed = 2101,
    UserUpdateFailed = 2102,
    UserAlreadyExists = 2103,
    UserWithoutSchool = 2104,

    // 班组与学生
    GroupNotFound = 3000,
    GroupCreationFailed = 3001,
    GroupUpdateFailed = 3002,
    GroupDeleteFailed = 3003,
    StudentNotFound = 3100,
    StudentCreationFailed = 3101,
    StudentUpdateFailed = 3102,
    StudentRutInvalid = 3103,
    StudentRutDuplicated = 3104,

    // 学习目标与活动
    LearningTargetNotFound = 3500,
    ActivityNotFound = 3501,
    ActivityCreationFailed = 3502,

    // 评估
    EvaluationNotFound = 4000,
    EvaluationUpdateFailed = 4002,
    EvaluationDeleteFailed = 4003,
    InvalidGroupSelection = 4004,
    GroupEvaluationNotFound = 4100,
    GroupEvaluationAlreadySent = 4101,
    GradingFailed = 4102,
    StudentEvaluationNotFound = 4103,

    // 轶事记录
    AnecdotalRecordNotFound = 5000,
    AnecdotalRecordCreationFailed = 5001,
    AnecdotalRecordUpdateFailed = 5002,

    // 报表
    ReportRenderFailed = 6000,
}
