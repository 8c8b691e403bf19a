use super::entities::Address;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 人员查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct PersonListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 人员列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct PersonListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

// 个人资料更新请求
//
// 只覆盖基础字段，子类型字段（学号、平均分、薪资）不受影响。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Option<Address>,
}
