use std::sync::Arc;

use crate::models::{
    courses::{
        entities::{Course, Seat},
        requests::{CourseListQuery, CreateCourseRequest, MergeSeatPayload},
        responses::{CourseDetailResponse, CourseListResponse, EnrollmentItem, MarkRecordResponse},
    },
    persons::{
        entities::Person,
        requests::{PersonListQuery, UpdateProfileRequest},
        responses::{PersonListResponse, StudentSearchItem},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（非管理员角色连同人员、地址一并创建，单事务）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 人员管理方法
    // 通过ID获取人员信息
    async fn get_person_by_id(&self, id: i64) -> Result<Option<Person>>;
    // 通过邮箱获取人员信息
    async fn get_person_by_email(&self, email: &str) -> Result<Option<Person>>;
    // 列出人员
    async fn list_persons_with_pagination(
        &self,
        query: PersonListQuery,
    ) -> Result<PersonListResponse>;
    // 统计人员数量
    async fn count_persons(&self) -> Result<u64>;
    // 学生搜索投影（id、姓名、学号，按姓名排序）
    async fn search_students(&self) -> Result<Vec<StudentSearchItem>>;
    // 列出所有教授
    async fn list_professors(&self) -> Result<Vec<Person>>;
    // 更新人员基础资料（部分覆盖，子类型字段不变）
    async fn update_person(&self, person_id: i64, update: UpdateProfileRequest) -> Result<Person>;

    /// 课程管理方法
    // 创建课程及其座位
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CourseDetailResponse>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过ID获取课程详情（含教授摘要与座位）
    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetailResponse>>;
    // 分页列出课程（按 ID 升序）
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 列出全部课程（选择控件用）
    async fn list_all_courses(&self) -> Result<Vec<Course>>;
    // 统计课程数量
    async fn count_courses(&self) -> Result<u64>;
    // 列出课程内已占座的学生
    async fn get_students_in_course(&self, course_id: i64) -> Result<Vec<Person>>;
    // 列出教授讲授的课程
    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>>;

    /// 选课管理方法
    // 把学生分配到课程的一个空座位
    async fn assign_student_to_course(&self, student_id: i64, course_id: i64) -> Result<Seat>;
    // 把学生从课程座位上移除（成绩一并清除）
    async fn unassign_student_from_course(&self, student_id: i64, course_id: i64) -> Result<()>;
    // 录入成绩并重算学生平均分
    async fn set_mark_to_student_in_course(
        &self,
        course_id: i64,
        student_id: i64,
        mark: f64,
    ) -> Result<MarkRecordResponse>;
    // 批量并入已绑定学生的座位
    async fn merge_seats_into_course(
        &self,
        seats: Vec<MergeSeatPayload>,
        course_id: i64,
    ) -> Result<CourseDetailResponse>;
    // 选课资格预检：学生在该课程没有座位时为 true
    async fn can_assign_student_to_course(&self, student_id: i64, course_id: i64) -> Result<bool>;
    // 学生视角的选课记录（课程 + 年度 + 成绩）
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentItem>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
