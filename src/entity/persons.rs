//! 人员实体
//!
//! 学生与教授共用一张表，`kind` 列区分子类型。
//! 子类型专属列（student_number / avg_mark / salary）对另一类型为 NULL。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: String,
    pub name: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub address_id: Option<i64>,
    #[sea_orm(unique)]
    pub student_number: Option<String>,
    pub avg_mark: Option<f64>,
    pub salary: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Address,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::seats::Entity")]
    Seats,
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::seats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_person(
        self,
        address: Option<super::addresses::Model>,
    ) -> crate::models::persons::entities::Person {
        use crate::models::persons::entities::{Person, PersonDetail};
        use chrono::{DateTime, Utc};

        let detail = match self.kind.as_str() {
            PersonDetail::PROFESSOR => PersonDetail::Professor {
                salary: self.salary.unwrap_or(0.0),
            },
            _ => PersonDetail::Student {
                student_number: self.student_number.unwrap_or_default(),
                avg_mark: self.avg_mark.unwrap_or(0.0),
            },
        };

        Person {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: address.map(|a| a.into_address()),
            detail,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
