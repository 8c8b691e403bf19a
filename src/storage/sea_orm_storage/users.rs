//! 用户存储操作
//!
//! 创建用户时在同一事务中创建地址与人员，任何一步失败整体回滚。

use super::SeaOrmStorage;
use crate::entity::addresses::ActiveModel as AddressActiveModel;
use crate::entity::persons::ActiveModel as PersonActiveModel;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AcadSysError, Result};
use crate::models::persons::entities::PersonDetail;
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, PersonPayload},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    ///
    /// 进入此方法时密码已经是哈希值。非管理员角色的人员载荷在同一事务内
    /// 展开为地址 + 人员记录；学号在这里生成。
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        let person_id = match &req.person {
            Some(payload) => Some(create_person_from_payload(&txn, payload, now).await?),
            None => None,
        };

        let model = ActiveModel {
            username: Set(req.username),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            person_id: Set(person_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| map_unique_violation(e, "用户名已存在"))?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

/// 把人员载荷展开为地址 + 人员记录，返回人员 ID
async fn create_person_from_payload(
    txn: &impl ConnectionTrait,
    payload: &PersonPayload,
    now: i64,
) -> Result<i64> {
    let address = match payload {
        PersonPayload::Student { address, .. } => address,
        PersonPayload::Professor { address, .. } => address,
    };

    let address_id = match address {
        Some(addr) => {
            let model = AddressActiveModel {
                street: Set(addr.street.clone()),
                city: Set(addr.city.clone()),
                state: Set(addr.state.clone()),
                country: Set(addr.country.clone()),
                ..Default::default()
            };
            let inserted = model
                .insert(txn)
                .await
                .map_err(|e| AcadSysError::database_operation(format!("创建地址失败: {e}")))?;
            Some(inserted.id)
        }
        None => None,
    };

    let model = match payload {
        PersonPayload::Student {
            name, phone, email, ..
        } => PersonActiveModel {
            kind: Set(PersonDetail::STUDENT.to_string()),
            name: Set(name.clone()),
            phone: Set(phone.clone()),
            email: Set(email.clone()),
            address_id: Set(address_id),
            // 学号由系统生成，全局唯一
            student_number: Set(Some(uuid::Uuid::new_v4().to_string())),
            avg_mark: Set(Some(0.0)),
            salary: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        },
        PersonPayload::Professor {
            name,
            phone,
            email,
            salary,
            ..
        } => PersonActiveModel {
            kind: Set(PersonDetail::PROFESSOR.to_string()),
            name: Set(name.clone()),
            phone: Set(phone.clone()),
            email: Set(email.clone()),
            address_id: Set(address_id),
            student_number: Set(None),
            avg_mark: Set(None),
            salary: Set(Some(salary.unwrap_or(0.0))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        },
    };

    let inserted = model
        .insert(txn)
        .await
        .map_err(|e| map_unique_violation(e, "该邮箱已被注册"))?;

    Ok(inserted.id)
}

/// 唯一约束冲突映射为校验错误，其余归为数据库操作错误
pub(super) fn map_unique_violation(e: sea_orm::DbErr, message: &str) -> AcadSysError {
    let text = e.to_string();
    if text.contains("UNIQUE") || text.contains("unique") || text.contains("Duplicate") {
        AcadSysError::validation(message)
    } else {
        AcadSysError::database_operation(format!("写入失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use crate::errors::AcadSysError;
    use crate::models::users::entities::Role;
    use crate::models::users::requests::{CreateUserRequest, PersonPayload};

    fn student_request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: "hashed".to_string(),
            role: Role::Student,
            person: Some(PersonPayload::Student {
                name: "Test Student".to_string(),
                phone: "555-0000".to_string(),
                email: email.to_string(),
                address: None,
            }),
        }
    }

    #[tokio::test]
    async fn test_admin_user_has_no_person() {
        let storage = memory_storage().await;
        let admin = storage
            .create_user_impl(CreateUserRequest {
                username: "admin".to_string(),
                password: "hashed".to_string(),
                role: Role::Admin,
                person: None,
            })
            .await
            .unwrap();
        assert_eq!(admin.person_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = memory_storage().await;
        storage
            .create_user_impl(student_request("stud_one", "one@example.edu"))
            .await
            .unwrap();

        let duplicate = storage
            .create_user_impl(student_request("stud_one", "other@example.edu"))
            .await;
        assert!(matches!(duplicate, Err(AcadSysError::Validation(_))));
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rolls_back_user_row() {
        let storage = memory_storage().await;
        storage
            .create_user_impl(student_request("stud_one", "shared@example.edu"))
            .await
            .unwrap();

        // 人员邮箱冲突时整个事务回滚，不会留下半个用户
        let duplicate = storage
            .create_user_impl(student_request("stud_two", "shared@example.edu"))
            .await;
        assert!(matches!(duplicate, Err(AcadSysError::Validation(_))));
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
        assert_eq!(storage.count_persons_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_student_number_generated_on_create() {
        let storage = memory_storage().await;
        let user = storage
            .create_user_impl(student_request("stud_uuid", "uuid@example.edu"))
            .await
            .unwrap();

        let person = storage
            .get_person_by_id_impl(user.person_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        match person.detail {
            crate::models::persons::entities::PersonDetail::Student {
                student_number,
                avg_mark,
            } => {
                assert!(!student_number.is_empty());
                assert_eq!(avg_mark, 0.0);
            }
            _ => panic!("expected a student person"),
        }
    }
}
