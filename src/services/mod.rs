pub mod auth;
pub mod courses;
pub mod persons;
pub mod users;

pub use auth::AuthService;
pub use courses::CourseService;
pub use persons::PersonService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::errors::AcadSysError;
use crate::models::{ApiResponse, ErrorCode};

// 领域错误到 HTTP 响应的统一映射：校验失败 400、未找到 404、其余 500
pub(crate) fn domain_error_response(
    e: &AcadSysError,
    validation_code: ErrorCode,
    not_found_code: ErrorCode,
) -> HttpResponse {
    match e {
        AcadSysError::Validation(_) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(validation_code, e.message())),
        AcadSysError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found_code, e.message()))
        }
        AcadSysError::Authentication(_) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, e.message())),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Internal error: {e}"),
        )),
    }
}
