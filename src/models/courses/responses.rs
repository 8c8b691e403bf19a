use super::entities::{Course, Seat};
use crate::models::common::PaginationInfo;
use crate::models::persons::entities::Person;
use crate::models::persons::responses::{PersonSummary, StudentSummary};
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 全量课程响应（选择控件用，不分页）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AllCoursesResponse {
    pub items: Vec<Course>,
}

// 课程详情响应：课程 + 教授摘要 + 座位列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    pub id: i64,
    pub name: String,
    pub professor: PersonSummary,
    pub seats: Vec<Seat>,
}

// 成绩记录响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct MarkRecordResponse {
    pub year: i32,
    pub student: StudentSummary,
    pub mark: f64,
}

// 课程学生响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseStudentsResponse {
    pub items: Vec<Person>,
}

// 学生视角的一条选课记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrollmentItem {
    pub course: Course,
    pub year: i32,
    pub mark: Option<f64>,
}

// 学生本人课程响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct StudentCoursesResponse {
    pub items: Vec<EnrollmentItem>,
    pub avg_mark: f64,
}

// 教授本人课程响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct TaughtCoursesResponse {
    pub items: Vec<Course>,
}

// 选课资格预检响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EligibilityResponse {
    pub can_assign: bool,
}
