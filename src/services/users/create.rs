use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::Role,
        requests::{CreateUserRequest, PersonPayload},
        responses::CreateUserResponse,
    },
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证用户名
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    // 验证密码强度
    if let Err(msg) = validate_password(&user_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordTooWeak, msg)));
    }

    // 角色与人员载荷必须对应：管理员没有人员，学生/教授必须带同类型载荷
    if let Err(msg) = check_role_payload(&user_data.role, &user_data.person) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PersonPayloadInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 检查用户名是否已存在
    if let Err(response) = check_username_exists(&storage, &user_data.username).await {
        return Ok(response);
    }

    // 检查人员邮箱格式与全局唯一
    if let Some(payload) = &user_data.person {
        if let Err(msg) = validate_email(payload.email()) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::PersonEmailInvalid, msg)));
        }
        if let Err(response) = check_email_exists(&storage, payload.email()).await {
            return Ok(response);
        }
    }

    // 哈希密码，明文不再往下传
    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let person_echo = user_data.person.clone();

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} created with role {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreateUserResponse {
                    id: user.id,
                    username: user.username,
                    role: user.role,
                    person: person_echo,
                },
                "用户创建成功",
            )))
        }
        Err(e) => {
            let msg = format!("User creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::UserCreationFailed, msg)))
        }
    }
}

/// 角色与人员载荷一致性检查
fn check_role_payload(role: &Role, payload: &Option<PersonPayload>) -> Result<(), &'static str> {
    match (role, payload) {
        (Role::Admin, None) => Ok(()),
        (Role::Admin, Some(_)) => Err("Admin accounts must not carry a person payload"),
        (_, None) => Err("Student and professor accounts require a person payload"),
        (role, Some(payload)) => {
            if payload.matches_role(role) {
                Ok(())
            } else {
                Err("Person payload type does not match the account role")
            }
        }
    }
}

async fn check_username_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserCreationFailed,
                format!("User creation failed: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_person_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::PersonEmailAlreadyExists,
            "Email already registered to another person",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserCreationFailed,
                format!("User creation failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::persons::entities::Address;

    fn student_payload() -> PersonPayload {
        PersonPayload::Student {
            name: "Ada".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.edu".to_string(),
            address: Some(Address {
                street: "1 Analytical Way".to_string(),
                city: "London".to_string(),
                state: "LDN".to_string(),
                country: "UK".to_string(),
            }),
        }
    }

    #[test]
    fn test_admin_must_not_carry_payload() {
        assert!(check_role_payload(&Role::Admin, &None).is_ok());
        assert!(check_role_payload(&Role::Admin, &Some(student_payload())).is_err());
    }

    #[test]
    fn test_person_roles_require_matching_payload() {
        assert!(check_role_payload(&Role::Student, &None).is_err());
        assert!(check_role_payload(&Role::Student, &Some(student_payload())).is_ok());
        assert!(check_role_payload(&Role::Professor, &Some(student_payload())).is_err());
    }
}
