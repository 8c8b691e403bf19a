pub mod list;
pub mod me;
pub mod professors;
pub mod search;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{AcadSysError, Result};
use crate::middlewares::RequireJWT;
use crate::models::persons::entities::{Person, PersonDetail};
use crate::models::persons::requests::{PersonListParams, UpdateProfileRequest};
use crate::storage::Storage;

pub struct PersonService {
    storage: Option<Arc<dyn Storage>>,
}

impl PersonService {
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

    // 分页列出人员
    pub async fn list_persons(
        &self,
        query: PersonListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_persons(self, query, request).await
    }

    // 学生搜索投影
    pub async fn search_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        search::search_students(self, request).await
    }

    // 教授列表（课程创建的选择控件用）
    pub async fn list_professors(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        professors::list_professors(self, request).await
    }

    // 当前登录用户的人员记录
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_me(self, request).await
    }

    // 更新当前登录用户的基础资料
    pub async fn update_me(
        &self,
        update_data: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_me(self, update_data, request).await
    }
}

/// 解析当前登录用户的人员记录
///
/// 管理员账号没有人员，返回校验错误；其余角色按 user.person_id 加载。
pub(crate) async fn resolve_current_person(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Person> {
    let user = RequireJWT::extract_user_claims(request)
        .ok_or_else(|| AcadSysError::authentication("当前请求没有登录用户"))?;

    let person_id = user
        .person_id
        .ok_or_else(|| AcadSysError::validation("该账号没有关联的人员记录"))?;

    storage
        .get_person_by_id(person_id)
        .await?
        .ok_or_else(|| AcadSysError::not_found(format!("未找到 ID 为 {person_id} 的人员")))
}

/// 解析当前登录用户的学生记录，非学生账号报校验错误
pub(crate) async fn resolve_current_student(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Person> {
    let person = resolve_current_person(storage, request).await?;
    match person.detail {
        PersonDetail::Student { .. } => Ok(person),
        PersonDetail::Professor { .. } => {
            Err(AcadSysError::validation("该账号关联的不是学生"))
        }
    }
}

/// 解析当前登录用户的教授记录，非教授账号报校验错误
pub(crate) async fn resolve_current_professor(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Person> {
    let person = resolve_current_person(storage, request).await?;
    match person.detail {
        PersonDetail::Professor { .. } => Ok(person),
        PersonDetail::Student { .. } => {
            Err(AcadSysError::validation("该账号关联的不是教授"))
        }
    }
}
