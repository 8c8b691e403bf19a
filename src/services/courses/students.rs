use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_course_manage_permission};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::responses::CourseStudentsResponse,
};
use crate::services::domain_error_response;

// 课程内已占座学生的完整记录
pub async fn get_students(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = check_course_manage_permission(&storage, request, course_id).await {
        return Ok(response);
    }

    match storage.get_students_in_course(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseStudentsResponse { items },
            "Course students retrieved successfully",
        ))),
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::BadRequest,
            ErrorCode::CourseNotFound,
        )),
    }
}
