use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::models::{
    ApiResponse, ErrorCode,
    persons::responses::StudentSearchResponse,
};

// 轻量级学生搜索：只返回 {id, 姓名, 学号} 三列投影，按姓名排序
pub async fn search_students(
    service: &PersonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.search_students().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentSearchResponse { items },
            "Student search completed",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Student search failed: {e}"),
            )),
        ),
    }
}
