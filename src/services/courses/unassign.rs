use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_course_manage_permission};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::domain_error_response;

// 退课：座位清空，成绩一并丢弃，学生平均分随之重算
pub async fn unassign_student(
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
        .unassign_student_from_course(student_id, course_id)
        .await
    {
        Ok(()) => {
            info!(
                "Student {} unassigned from course {}",
                student_id, course_id
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Student unassigned successfully")))
        }
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::StudentNotInCourse,
            ErrorCode::CourseNotFound,
        )),
    }
}
