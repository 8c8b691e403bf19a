use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_course_manage_permission};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::SetMarkRequest,
};
use crate::services::domain_error_response;

// 成绩取值范围，两端闭区间
const MIN_MARK: f64 = 0.0;
const MAX_MARK: f64 = 10.0;

pub async fn set_mark(
    service: &CourseService,
    course_id: i64,
    student_id: i64,
    mark_data: SetMarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !mark_data.mark.is_finite() || mark_data.mark < MIN_MARK || mark_data.mark > MAX_MARK {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MarkOutOfRange,
            format!("Mark must be between {MIN_MARK} and {MAX_MARK}"),
        )));
    }

    let storage = service.get_storage(request);

    if let Err(response) = check_course_manage_permission(&storage, request, course_id).await {
        return Ok(response);
    }

    match storage
        .set_mark_to_student_in_course(course_id, student_id, mark_data.mark)
        .await
    {
        Ok(record) => {
            info!(
                "Mark {} recorded for student {} in course {}",
                record.mark, student_id, course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Mark recorded successfully")))
        }
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::StudentNotInCourse,
            ErrorCode::CourseNotFound,
        )),
    }
}
