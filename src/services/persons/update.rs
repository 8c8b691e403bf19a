use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PersonService, resolve_current_person};
use crate::models::{
    ApiResponse, ErrorCode,
    persons::{requests::UpdateProfileRequest, responses::PersonResponse},
};
use crate::services::domain_error_response;
use crate::utils::validate::validate_email;

// 部分覆盖：只更新姓名、电话、邮箱与地址，学号/平均分/薪资不动
pub async fn update_me(
    service: &PersonService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "姓名不能为空",
        )));
    }

    if let Err(msg) = validate_email(&update_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PersonEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let person = match resolve_current_person(&storage, request).await {
        Ok(person) => person,
        Err(e) => {
            return Ok(domain_error_response(
                &e,
                ErrorCode::PersonNotFound,
                ErrorCode::PersonNotFound,
            ));
        }
    };

    match storage.update_person(person.id, update_data).await {
        Ok(updated) => {
            info!("Person {} updated their profile", updated.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PersonResponse { person: updated },
                "Profile updated successfully",
            )))
        }
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::PersonEmailAlreadyExists,
            ErrorCode::PersonNotFound,
        )),
    }
}
