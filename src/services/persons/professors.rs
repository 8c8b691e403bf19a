use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::models::{
    ApiResponse, ErrorCode,
    persons::responses::ProfessorListResponse,
};

pub async fn list_professors(
    service: &PersonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_professors().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfessorListResponse { items },
            "Professor list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve professor list: {e}"),
            )),
        ),
    }
}
