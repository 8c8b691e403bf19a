use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PersonService, resolve_current_person};
use crate::models::{
    ApiResponse, ErrorCode,
    persons::responses::PersonResponse,
};
use crate::services::domain_error_response;

pub async fn get_me(service: &PersonService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match resolve_current_person(&storage, request).await {
        Ok(person) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PersonResponse { person },
            "Profile retrieved successfully",
        ))),
        Err(e) => Ok(domain_error_response(
            &e,
            ErrorCode::PersonNotFound,
            ErrorCode::PersonNotFound,
        )),
    }
}
