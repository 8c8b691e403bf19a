//! 人员存储操作

use super::SeaOrmStorage;
use super::users::map_unique_violation;
use crate::entity::addresses::{ActiveModel as AddressActiveModel, Entity as Addresses};
use crate::entity::persons::{ActiveModel, Column, Entity as Persons};
use crate::errors::{AcadSysError, Result};
use crate::models::{
    PaginationInfo,
    persons::{
        entities::{Person, PersonDetail},
        requests::{PersonListQuery, UpdateProfileRequest},
        responses::{PersonListResponse, StudentSearchItem},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 加载人员及其地址
pub(super) async fn load_person(db: &impl ConnectionTrait, id: i64) -> Result<Option<Person>> {
    let result = Persons::find_by_id(id)
        .find_also_related(Addresses)
        .one(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询人员失败: {e}")))?;

    Ok(result.map(|(person, address)| person.into_person(address)))
}

impl SeaOrmStorage {
    /// 通过 ID 获取人员
    pub async fn get_person_by_id_impl(&self, id: i64) -> Result<Option<Person>> {
        load_person(&self.db, id).await
    }

    /// 通过邮箱获取人员
    pub async fn get_person_by_email_impl(&self, email: &str) -> Result<Option<Person>> {
        let result = Persons::find()
            .filter(Column::Email.eq(email))
            .find_also_related(Addresses)
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询人员失败: {e}")))?;

        Ok(result.map(|(person, address)| person.into_person(address)))
    }

    /// 分页列出人员（按 ID 升序）
    pub async fn list_persons_with_pagination_impl(
        &self,
        query: PersonListQuery,
    ) -> Result<PersonListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Persons::find()
            .find_also_related(Addresses)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询人员总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询人员页数失败: {e}")))?;

        let persons = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询人员列表失败: {e}")))?;

        Ok(PersonListResponse {
            items: persons
                .into_iter()
                .map(|(person, address)| person.into_person(address))
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 统计人员数量
    pub async fn count_persons_impl(&self) -> Result<u64> {
        let count = Persons::find()
            .count(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("统计人员数量失败: {e}")))?;

        Ok(count)
    }

    /// 学生搜索投影
    ///
    /// 只取三列，按姓名排序，避免把整行学生数据拉进内存。
    pub async fn search_students_impl(&self) -> Result<Vec<StudentSearchItem>> {
        let rows: Vec<(i64, String, Option<String>)> = Persons::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Name)
            .column(Column::StudentNumber)
            .filter(Column::Kind.eq(PersonDetail::STUDENT))
            .order_by_asc(Column::Name)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("搜索学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, student_number)| StudentSearchItem {
                id,
                name,
                student_number: student_number.unwrap_or_default(),
            })
            .collect())
    }

    /// 列出所有教授
    pub async fn list_professors_impl(&self) -> Result<Vec<Person>> {
        let rows = Persons::find()
            .filter(Column::Kind.eq(PersonDetail::PROFESSOR))
            .find_also_related(Addresses)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询教授列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(person, address)| person.into_person(address))
            .collect())
    }

    /// 更新人员基础资料
    ///
    /// 只覆盖姓名、电话、邮箱与地址；邮箱变化时重新校验全局唯一。
    pub async fn update_person_impl(
        &self,
        person_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Person> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Persons::find_by_id(person_id)
            .one(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询人员失败: {e}")))?
            .ok_or_else(|| AcadSysError::not_found(format!("未找到 ID 为 {person_id} 的人员")))?;

        if update.email != existing.email {
            let duplicate = Persons::find()
                .filter(Column::Email.eq(update.email.as_str()))
                .filter(Column::Id.ne(person_id))
                .count(&txn)
                .await
                .map_err(|e| AcadSysError::database_operation(format!("校验邮箱失败: {e}")))?;
            if duplicate > 0 {
                return Err(AcadSysError::validation("该邮箱已被注册"));
            }
        }

        // 地址：有就更新，没有就新建
        let mut address_id = existing.address_id;
        if let Some(addr) = &update.address {
            match existing.address_id {
                Some(id) => {
                    let model = AddressActiveModel {
                        id: Set(id),
                        street: Set(addr.street.clone()),
                        city: Set(addr.city.clone()),
                        state: Set(addr.state.clone()),
                        country: Set(addr.country.clone()),
                    };
                    model
                        .update(&txn)
                        .await
                        .map_err(|e| AcadSysError::database_operation(format!("更新地址失败: {e}")))?;
                }
                None => {
                    let model = AddressActiveModel {
                        street: Set(addr.street.clone()),
                        city: Set(addr.city.clone()),
                        state: Set(addr.state.clone()),
                        country: Set(addr.country.clone()),
                        ..Default::default()
                    };
                    let inserted = model
                        .insert(&txn)
                        .await
                        .map_err(|e| AcadSysError::database_operation(format!("创建地址失败: {e}")))?;
                    address_id = Some(inserted.id);
                }
            }
        }

        let model = ActiveModel {
            id: Set(person_id),
            name: Set(update.name),
            phone: Set(update.phone),
            email: Set(update.email),
            address_id: Set(address_id),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&txn)
            .await
            .map_err(|e| map_unique_violation(e, "该邮箱已被注册"))?;

        let person = load_person(&txn, person_id)
            .await?
            .ok_or_else(|| AcadSysError::not_found(format!("未找到 ID 为 {person_id} 的人员")))?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(person)
    }
}
