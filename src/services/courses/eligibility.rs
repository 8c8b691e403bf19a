use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_course_manage_permission};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::responses::EligibilityResponse,
};
use crate::services::domain_error_response;

// 选课资格预检：学生在该课程没有座位时才可分配
pub async fn check_eligibility(
    service: &CourseService,
    course_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = check_course_manage_permission(&storage, request, course_id).await {
        return Ok(response);
    }

    match storage
        .can_assign_student_to_course(student_id, course_id)
        .await
    {
        Ok(can_assign) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EligibilityResponse { can_assign },
            "Eligibility check completed",
        ))),
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::BadRequest,
            ErrorCode::StudentNotFound,
        )),
    }
}
