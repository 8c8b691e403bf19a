use super::entities::{Role, User};
use super::requests::PersonPayload;
use crate::models::persons::entities::Person;
use serde::Serialize;
use ts_rs::TS;

// 用户创建响应：回显用户名、角色与人员载荷
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub person: Option<PersonPayload>,
}

// 用户响应（含关联人员）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
    pub person: Option<Person>,
}
