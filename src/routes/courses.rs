use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    AssignStudentRequest, CourseQueryParams, CreateCourseRequest, MergeSeatsRequest,
    SetMarkRequest,
};
use crate::models::users::entities::Role;
use crate::services::CourseService;
use crate::utils::{SafeCourseIdI64, SafeStudentIdI64};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn list_all_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_all_courses(&req).await
}

pub async fn my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.my_courses(&req).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

pub async fn get_students(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_students(course_id.0, &req).await
}

pub async fn assign_student(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    assign_data: web::Json<AssignStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .assign_student(course_id.0, assign_data.into_inner(), &req)
        .await
}

pub async fn unassign_student(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .unassign_student(course_id.0, student_id.0, &req)
        .await
}

pub async fn set_mark(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    student_id: SafeStudentIdI64,
    mark_data: web::Json<SetMarkRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .set_mark(course_id.0, student_id.0, mark_data.into_inner(), &req)
        .await
}

pub async fn merge_seats(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    merge_data: web::Json<MergeSeatsRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .merge_seats(course_id.0, merge_data.into_inner(), &req)
        .await
}

pub async fn check_eligibility(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .check_eligibility(course_id.0, student_id.0, &req)
        .await
}

// 配置路由
//
// 字面路径（/all、/mine）要注册在 /{course_id} 之前，否则会被参数路由吞掉。
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_courses)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                    ),
            )
            .service(
                web::resource("/all").route(
                    web::get()
                        .to(list_all_courses)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                // 学生看自己的选课与成绩，教授看自己讲授的课程
                web::resource("/mine").route(
                    web::get()
                        .to(my_courses)
                        .wrap(middlewares::RequireRole::new_any(Role::person_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}").route(
                    web::get()
                        .to(get_course)
                        .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/seats").route(
                    web::post()
                        .to(merge_seats)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/students")
                    .route(
                        web::get()
                            .to(get_students)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(assign_student)
                            .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{course_id}/students/{student_id}").route(
                    web::delete()
                        .to(unassign_student)
                        .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/students/{student_id}/mark").route(
                    web::put()
                        .to(set_mark)
                        .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}/students/{student_id}/eligibility").route(
                    web::get()
                        .to(check_eligibility)
                        .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                ),
            ),
    );
}
