use super::entities::Role;
use crate::models::persons::entities::Address;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 人员创建载荷，type 标签显式区分学生与教授
//
// 管理员账号没有人员载荷；学号与平均分由系统生成，不在载荷中。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum PersonPayload {
    Student {
        name: String,
        phone: String,
        email: String,
        address: Option<Address>,
    },
    Professor {
        name: String,
        phone: String,
        email: String,
        address: Option<Address>,
        salary: Option<f64>,
    },
}

impl PersonPayload {
    pub fn name(&self) -> &str {
        match self {
            PersonPayload::Student { name, .. } => name,
            PersonPayload::Professor { name, .. } => name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            PersonPayload::Student { email, .. } => email,
            PersonPayload::Professor { email, .. } => email,
        }
    }

    // 载荷子类型必须与账号角色一致
    pub fn matches_role(&self, role: &Role) -> bool {
        matches!(
            (self, role),
            (PersonPayload::Student { .. }, Role::Student)
                | (PersonPayload::Professor { .. }, Role::Professor)
        )
    }
}

// 用户创建请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub person: Option<PersonPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_payload_decodes_by_tag() {
        let json = r#"{
            "type": "professor",
            "name": "Grace Hopper",
            "phone": "555-0100",
            "email": "grace@example.edu",
            "address": null,
            "salary": 4200.0
        }"#;
        let payload: PersonPayload = serde_json::from_str(json).unwrap();
        assert!(matches!(payload, PersonPayload::Professor { .. }));
        assert!(payload.matches_role(&Role::Professor));
        assert!(!payload.matches_role(&Role::Student));
    }

    #[test]
    fn test_person_payload_rejects_missing_tag() {
        let json = r#"{"name": "n", "phone": "p", "email": "e"}"#;
        assert!(serde_json::from_str::<PersonPayload>(json).is_err());
    }
}
