use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::models::{
    ApiResponse, ErrorCode,
    persons::requests::{PersonListParams, PersonListQuery},
};

pub async fn list_persons(
    service: &PersonService,
    query: PersonListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = PersonListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
    };

    match storage.list_persons_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Person list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve person list: {e}"),
            )),
        ),
    }
}
