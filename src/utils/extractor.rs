//! 路径参数安全提取器
//!
//! 解析失败时直接返回 400 与统一响应体，而不是 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_param(name: &str) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        format!("invalid path parameter: {name}"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid path parameter: {name}"),
        )),
    )
    .into()
}

fn parse_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| bad_param(name))
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_i64(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
}
