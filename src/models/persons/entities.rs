use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 地址
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

// 人员子类型数据，type 标签区分学生与教授
//
// student_number 由系统生成，avg_mark 是派生值，二者都不接受外部写入。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub enum PersonDetail {
    Student {
        student_number: String,
        avg_mark: f64,
    },
    Professor {
        salary: f64,
    },
}

impl PersonDetail {
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";

    pub fn kind(&self) -> &'static str {
        match self {
            PersonDetail::Student { .. } => Self::STUDENT,
            PersonDetail::Professor { .. } => Self::PROFESSOR,
        }
    }
}

// 人员实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/person.ts")]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Option<Address>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub detail: PersonDetail,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Person {
    pub fn is_student(&self) -> bool {
        matches!(self.detail, PersonDetail::Student { .. })
    }

    pub fn is_professor(&self) -> bool {
        matches!(self.detail, PersonDetail::Professor { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_detail_tag_round_trip() {
        let detail = PersonDetail::Student {
            student_number: "c6b0a441-9eca-4c43-bb39-a1f01b0fa0ce".to_string(),
            avg_mark: 7.5,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"type\":\"student\""));
        let back: PersonDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_person_detail_rejects_unknown_tag() {
        let json = r#"{"type":"assistant","salary":100.0}"#;
        assert!(serde_json::from_str::<PersonDetail>(json).is_err());
    }
}
