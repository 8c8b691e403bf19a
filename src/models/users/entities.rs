use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum Role {
    Admin,     // 管理员
    Student,   // 学生
    Professor, // 教授
}

impl Role {
    pub const ADMIN: &'static str = "admin";
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";

    pub fn admin_roles() -> &'static [&'static Role] {
        &[&Self::Admin]
    }
    // 教学管理操作：教授管理自己的课程，管理员管理所有课程
    pub fn staff_roles() -> &'static [&'static Role] {
        &[&Self::Professor, &Self::Admin]
    }
    pub fn person_roles() -> &'static [&'static Role] {
        &[&Self::Student, &Self::Professor]
    }
    pub fn all_roles() -> &'static [&'static Role] {
        &[&Self::Admin, &Self::Student, &Self::Professor]
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Role::ADMIN => Ok(Role::Admin),
            Role::STUDENT => Ok(Role::Student),
            Role::PROFESSOR => Ok(Role::Professor),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, student, professor"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", Role::ADMIN),
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Professor => write!(f, "{}", Role::PROFESSOR),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: Role,
    pub person_id: Option<i64>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Student, Role::Professor] {
            let parsed = Role::from_str(&role.to_string()).unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!(Role::from_str("teacher").is_err());
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_staff_roles_exclude_student() {
        assert!(!Role::staff_roles().contains(&&Role::Student));
        assert!(Role::staff_roles().contains(&&Role::Professor));
        assert!(Role::staff_roles().contains(&&Role::Admin));
    }
}
