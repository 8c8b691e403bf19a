use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, check_course_manage_permission};
use crate::errors::AcadSysError;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::AssignStudentRequest,
};
use crate::services::domain_error_response;

pub async fn assign_student(
    service: &CourseService,
    course_id: i64,
    assign_data: AssignStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = check_course_manage_permission(&storage, request, course_id).await {
        return Ok(response);
    }

    match storage
        .assign_student_to_course(assign_data.student_id, course_id)
        .await
    {
        Ok(seat) => {
            info!(
                "Student {} assigned to seat {} of course {}",
                assign_data.student_id, seat.id, course_id
            );
            // 返回更新后的课程投影
            match storage.get_course_detail(course_id).await {
                Ok(Some(detail)) => Ok(HttpResponse::Ok()
                    .json(ApiResponse::success(detail, "Student assigned successfully"))),
                Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    format!("未找到 ID 为 {course_id} 的课程"),
                ))),
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                ),
            }
        }
        Err(e) => Ok(assign_error_response(&e)),
    }
}

/// 选课失败的细分错误码：满员与重复选课分开报
fn assign_error_response(e: &AcadSysError) -> HttpResponse {
    match e {
        AcadSysError::Validation(msg) if msg.contains("已满") => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseFull, msg.as_str())),
        AcadSysError::Validation(msg) if msg.contains("已经选了") => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyAssigned,
                msg.as_str(),
            )),
        _ => domain_error_response(e, ErrorCode::SeatValidationFailed, ErrorCode::CourseNotFound),
    }
}
