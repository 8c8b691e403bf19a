use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::responses::{StudentCoursesResponse, TaughtCoursesResponse},
    persons::entities::PersonDetail,
    users::entities::Role,
};
use crate::services::domain_error_response;
use crate::services::persons::{resolve_current_professor, resolve_current_student};

// 按角色返回"我的课程"：学生看选课记录与平均分，教授看所授课程
pub async fn my_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match RequireJWT::extract_user_role(request) {
        Some(Role::Student) => {
            let student = match resolve_current_student(&storage, request).await {
                Ok(person) => person,
                Err(e) => {
                    return Ok(domain_error_response(
                        &e,
                        ErrorCode::StudentNotFound,
                        ErrorCode::StudentNotFound,
                    ));
                }
            };

            let avg_mark = match &student.detail {
                PersonDetail::Student { avg_mark, .. } => *avg_mark,
                PersonDetail::Professor { .. } => 0.0,
            };

            match storage.list_student_enrollments(student.id).await {
                Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    StudentCoursesResponse { items, avg_mark },
                    "Enrollments retrieved successfully",
                ))),
                Err(e) => Ok(domain_error_response(
                    &e,
                    ErrorCode::BadRequest,
                    ErrorCode::StudentNotFound,
                )),
            }
        }
        Some(Role::Professor) => {
            let professor = match resolve_current_professor(&storage, request).await {
                Ok(person) => person,
                Err(e) => {
                    return Ok(domain_error_response(
                        &e,
                        ErrorCode::ProfessorNotFound,
                        ErrorCode::ProfessorNotFound,
                    ));
                }
            };

            match storage.list_courses_by_professor(professor.id).await {
                Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    TaughtCoursesResponse { items },
                    "Taught courses retrieved successfully",
                ))),
                Err(e) => Ok(domain_error_response(
                    &e,
                    ErrorCode::BadRequest,
                    ErrorCode::ProfessorNotFound,
                )),
            }
        }
        _ => Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Only students and professors have their own course view",
        ))),
    }
}
