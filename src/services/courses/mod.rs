pub mod all;
pub mod assign;
pub mod create;
pub mod eligibility;
pub mod get;
pub mod list;
pub mod mark;
pub mod merge_seats;
pub mod mine;
pub mod students;
pub mod unassign;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::courses::requests::{
    AssignStudentRequest, CourseQueryParams, CreateCourseRequest, MergeSeatsRequest,
    SetMarkRequest,
};
use crate::models::users::entities::Role;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::persons::resolve_current_professor;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建课程及其座位
    pub async fn create_course(
        &self,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course_data, request).await
    }

    // 分页列出课程
    pub async fn list_courses(
        &self,
        query: CourseQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    // 全量课程列表（选择控件用）
    pub async fn list_all_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        all::list_all_courses(self, request).await
    }

    // 当前登录用户的课程（学生看选课与成绩，教授看所授课程）
    pub async fn my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mine::my_courses(self, request).await
    }

    // 课程详情
    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    // 课程内学生列表
    pub async fn get_students(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::get_students(self, course_id, request).await
    }

    // 把学生分配到课程的一个空座位
    pub async fn assign_student(
        &self,
        course_id: i64,
        assign_data: AssignStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_student(self, course_id, assign_data, request).await
    }

    // 把学生从课程座位上移除
    pub async fn unassign_student(
        &self,
        course_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        unassign::unassign_student(self, course_id, student_id, request).await
    }

    // 录入成绩
    pub async fn set_mark(
        &self,
        course_id: i64,
        student_id: i64,
        mark_data: SetMarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::set_mark(self, course_id, student_id, mark_data, request).await
    }

    // 批量并入座位
    pub async fn merge_seats(
        &self,
        course_id: i64,
        merge_data: MergeSeatsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        merge_seats::merge_seats(self, course_id, merge_data, request).await
    }

    // 选课资格预检
    pub async fn check_eligibility(
        &self,
        course_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        eligibility::check_eligibility(self, course_id, student_id, request).await
    }
}

/// 课程管理权限校验
///
/// 管理员管理所有课程；教授只能操作自己讲授的课程。
pub(super) async fn check_course_manage_permission(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<(), HttpResponse> {
    match RequireJWT::extract_user_role(request) {
        Some(Role::Admin) => Ok(()),
        Some(Role::Professor) => {
            let professor = match resolve_current_professor(storage, request).await {
                Ok(person) => person,
                Err(e) => {
                    return Err(crate::services::domain_error_response(
                        &e,
                        ErrorCode::ProfessorNotFound,
                        ErrorCode::ProfessorNotFound,
                    ));
                }
            };

            match storage.get_course_by_id(course_id).await {
                Ok(Some(course)) if course.professor_id == professor.id => Ok(()),
                Ok(Some(course)) => {
                    info!(
                        "Professor {} denied access to course {} taught by {}",
                        professor.id, course.id, course.professor_id
                    );
                    Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::PermissionDenied,
                        "You can only manage your own courses",
                    )))
                }
                Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    format!("未找到 ID 为 {course_id} 的课程"),
                ))),
                Err(e) => Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                ),
            }
        }
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "You do not have permission to manage courses",
        ))),
    }
}
