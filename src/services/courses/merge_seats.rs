use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::MergeSeatsRequest,
};
use crate::services::domain_error_response;

// 批量并入座位：每个座位必须绑定学生并声明目标课程
pub async fn merge_seats(
    service: &CourseService,
    course_id: i64,
    merge_data: MergeSeatsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if merge_data.seats.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SeatValidationFailed,
            "Seat list must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .merge_seats_into_course(merge_data.seats, course_id)
        .await
    {
        Ok(detail) => {
            info!(
                "{} seats merged into course {}",
                detail.seats.len(),
                course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Seats merged successfully")))
        }
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::SeatValidationFailed,
            ErrorCode::CourseNotFound,
        )),
    }
}
