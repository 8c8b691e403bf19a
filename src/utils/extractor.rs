//! 路径参数安全提取器
//!
//! 在进入处理程序前校验路径中的数字 ID，非法值直接返回 400，
//! 避免每个处理程序重复解析。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, err, ok};

use crate::models::{ApiResponse, ErrorCode};

fn bad_id_response(param: &str, raw: Option<&str>) -> Error {
    let message = match raw {
        Some(value) => format!("Invalid {param}: '{value}'"),
        None => format!("Missing path parameter: {param}"),
    };
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn extract_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, Error> {
    let raw = req.match_info().get(param);
    match raw.and_then(|v| v.parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(bad_id_response(param, raw)),
    }
}

/// 为命名路径参数生成提取器类型的宏
macro_rules! define_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                match extract_positive_i64(req, $param) {
                    Ok(id) => ok($name(id)),
                    Err(e) => err(e),
                }
            }
        }
    };
}

define_id_extractor!(SafeIDI64, "id");
define_id_extractor!(SafeCourseIdI64, "course_id");
define_id_extractor!(SafeStudentIdI64, "student_id");
