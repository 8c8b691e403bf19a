use super::entities::Person;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 人员列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct PersonListResponse {
    pub items: Vec<Person>,
    pub pagination: PaginationInfo,
}

// 人员响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct PersonResponse {
    pub person: Person,
}

// 人员摘要（选择控件、课程详情内嵌用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct PersonSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&Person> for PersonSummary {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            email: person.email.clone(),
        }
    }
}

// 学生摘要（成绩记录内嵌用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub student_number: String,
    pub avg_mark: f64,
}

// 学生搜索投影，只取三个字段，避免整行加载
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct StudentSearchItem {
    pub id: i64,
    pub name: String,
    pub student_number: String,
}

// 学生搜索响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct StudentSearchResponse {
    pub items: Vec<StudentSearchItem>,
}

// 教授列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct ProfessorListResponse {
    pub items: Vec<Person>,
}
