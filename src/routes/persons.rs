use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::persons::requests::{PersonListParams, UpdateProfileRequest};
use crate::models::users::entities::Role;
use crate::services::PersonService;

// 懒加载的全局 PersonService 实例
static PERSON_SERVICE: Lazy<PersonService> = Lazy::new(PersonService::new_lazy);

// HTTP处理程序
pub async fn list_persons(
    req: HttpRequest,
    query: web::Query<PersonListParams>,
) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.list_persons(query.into_inner(), &req).await
}

pub async fn search_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.search_students(&req).await
}

pub async fn list_professors(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.list_professors(&req).await
}

pub async fn get_me(req: HttpRequest) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.get_me(&req).await
}

pub async fn update_me(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PERSON_SERVICE.update_me(update_data.into_inner(), &req).await
}

// 配置路由
pub fn configure_person_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/persons")
            .wrap(middlewares::RequireJWT)
            .service(
                // 本人资料：任何已登录角色可读，学生/教授可改
                web::resource("/me")
                    .route(web::get().to(get_me))
                    .route(
                        web::put()
                            .to(update_me)
                            .wrap(middlewares::RequireRole::new_any(Role::person_roles())),
                    ),
            )
            .service(
                // 学生搜索投影：管理员与教授在分配座位时使用
                web::resource("/students/search").route(
                    web::get()
                        .to(search_students)
                        .wrap(middlewares::RequireRole::new_any(Role::staff_roles())),
                ),
            )
            .service(
                // 教授列表：管理员创建课程时的选择控件
                web::resource("/professors").route(
                    web::get()
                        .to(list_professors)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            )
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_persons)
                        .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
                ),
            ),
    );
}
