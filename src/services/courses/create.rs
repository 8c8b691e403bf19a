use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::CreateCourseRequest,
};
use crate::services::domain_error_response;

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 座位描述二选一：数量或显式列表，两者都给则数量优先
    if course_data.seats_amount.is_none() && course_data.seats.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseCreationFailed,
            "Either seats_amount or an explicit seat list is required",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_course(course_data).await {
        Ok(detail) => {
            info!("Course {} created with {} seats", detail.name, detail.seats.len());
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Course created successfully")))
        }
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::CourseCreationFailed,
            ErrorCode::ProfessorNotFound,
        )),
    }
}
