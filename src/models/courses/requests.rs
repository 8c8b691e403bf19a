use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

// 创建课程时的座位描述
//
// 两种写法二选一：
// - seats_amount = N：创建 N 个空座位，年度取当前年
// - seats = [...]：显式座位列表，可预先绑定学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub professor_id: i64,
    pub seats_amount: Option<u32>,
    pub seats: Option<Vec<SeatPayload>>,
}

// 座位载荷
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct SeatPayload {
    pub student_id: Option<i64>,
    pub year: Option<i32>,
    pub mark: Option<f64>,
}

// 分配学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AssignStudentRequest {
    pub student_id: i64,
}

// 录入成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct SetMarkRequest {
    pub mark: f64,
}

// 批量并入座位请求
//
// 每个座位必须带学生并声明所属课程，与路径中的课程 ID 一致。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct MergeSeatsRequest {
    pub seats: Vec<MergeSeatPayload>,
}

// 批量座位载荷
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct MergeSeatPayload {
    pub course_id: i64,
    pub student_id: Option<i64>,
    pub year: Option<i32>,
    pub mark: Option<f64>,
}
