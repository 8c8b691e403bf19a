//! 课程存储操作
//!
//! 课程与其座位在同一事务内创建；校验全部发生在第一条写入之前。

use super::SeaOrmStorage;
use super::persons::load_person;
use super::seats::recompute_avg_mark;
use super::users::map_unique_violation;
use crate::entity::courses::{Column, Entity as Courses, Model as CourseModel};
use crate::entity::persons::{Column as PersonColumn, Entity as Persons};
use crate::entity::seats::{
    ActiveModel as SeatActiveModel, Column as SeatColumn, Entity as Seats,
};
use crate::errors::{AcadSysError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, SeatPayload},
        responses::{CourseDetailResponse, CourseListResponse},
    },
    persons::{entities::Person, entities::PersonDetail, responses::PersonSummary},
};
use chrono::Datelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 组装课程详情：课程 + 教授摘要 + 座位列表
pub(super) async fn course_detail(
    db: &impl ConnectionTrait,
    course: CourseModel,
) -> Result<CourseDetailResponse> {
    let professor = load_person(db, course.professor_id)
        .await?
        .ok_or_else(|| {
            AcadSysError::not_found(format!("未找到 ID 为 {} 的教授", course.professor_id))
        })?;

    let seats = Seats::find()
        .filter(SeatColumn::CourseId.eq(course.id))
        .order_by_asc(SeatColumn::Id)
        .all(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询座位失败: {e}")))?;

    Ok(CourseDetailResponse {
        id: course.id,
        name: course.name,
        professor: PersonSummary::from(&professor),
        seats: seats.into_iter().map(|m| m.into_seat()).collect(),
    })
}

/// 校验人员存在且是学生
pub(super) async fn ensure_student_exists(
    db: &impl ConnectionTrait,
    student_id: i64,
) -> Result<()> {
    let count = Persons::find()
        .filter(PersonColumn::Id.eq(student_id))
        .filter(PersonColumn::Kind.eq(PersonDetail::STUDENT))
        .count(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询学生失败: {e}")))?;

    if count == 0 {
        return Err(AcadSysError::validation(format!(
            "未找到 ID 为 {student_id} 的学生"
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建课程及其座位
    pub async fn create_course_impl(
        &self,
        req: CreateCourseRequest,
    ) -> Result<CourseDetailResponse> {
        if req.name.trim().is_empty() {
            return Err(AcadSysError::validation("课程名称不能为空"));
        }

        let now = chrono::Utc::now().timestamp();
        let current_year = chrono::Utc::now().year();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        // 教授引用必须指向已注册的教授
        let professor_exists = Persons::find()
            .filter(PersonColumn::Id.eq(req.professor_id))
            .filter(PersonColumn::Kind.eq(PersonDetail::PROFESSOR))
            .count(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询教授失败: {e}")))?;
        if professor_exists == 0 {
            return Err(AcadSysError::validation(format!(
                "未找到 ID 为 {} 的教授",
                req.professor_id
            )));
        }

        let course = crate::entity::courses::ActiveModel {
            name: Set(req.name.trim().to_string()),
            professor_id: Set(req.professor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("创建课程失败: {e}")))?;

        // 两种座位描述二选一：数量优先，其次显式列表
        if let Some(amount) = req.seats_amount
            && amount > 0
        {
            let empty_seats = (0..amount).map(|_| SeatActiveModel {
                course_id: Set(course.id),
                student_id: Set(None),
                year: Set(current_year),
                mark: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            });
            Seats::insert_many(empty_seats)
                .exec(&txn)
                .await
                .map_err(|e| AcadSysError::database_operation(format!("创建座位失败: {e}")))?;
        } else if let Some(seats) = &req.seats
            && !seats.is_empty()
        {
            insert_seat_payloads(&txn, course.id, seats, current_year, now).await?;
        }

        let detail = course_detail(&txn, course).await?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(detail)
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过 ID 获取课程详情
    pub async fn get_course_detail_impl(
        &self,
        course_id: i64,
    ) -> Result<Option<CourseDetailResponse>> {
        let course = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程失败: {e}")))?;

        match course {
            Some(course) => Ok(Some(course_detail(&self.db, course).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出课程（按 ID 升序）
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Courses::find().order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出全部课程
    pub async fn list_all_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 统计课程数量
    pub async fn count_courses_impl(&self) -> Result<u64> {
        let count = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count)
    }

    /// 列出课程内已占座的学生（完整加载）
    pub async fn get_students_in_course_impl(&self, course_id: i64) -> Result<Vec<Person>> {
        let course = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程失败: {e}")))?;
        if course.is_none() {
            return Err(AcadSysError::not_found(format!(
                "未找到 ID 为 {course_id} 的课程"
            )));
        }

        let seats = Seats::find()
            .filter(SeatColumn::CourseId.eq(course_id))
            .filter(SeatColumn::StudentId.is_not_null())
            .order_by_asc(SeatColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询座位失败: {e}")))?;

        let mut students = Vec::with_capacity(seats.len());
        for seat in seats {
            if let Some(student_id) = seat.student_id
                && let Some(person) = load_person(&self.db, student_id).await?
            {
                students.push(person);
            }
        }

        Ok(students)
    }

    /// 列出教授讲授的课程
    pub async fn list_courses_by_professor_impl(&self, professor_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }
}

/// 插入显式座位列表，带学生的座位校验学生存在并重算其平均分
async fn insert_seat_payloads(
    txn: &impl ConnectionTrait,
    course_id: i64,
    seats: &[SeatPayload],
    current_year: i32,
    now: i64,
) -> Result<()> {
    // 先全部校验，再开始写入
    for seat in seats {
        if let Some(student_id) = seat.student_id {
            ensure_student_exists(txn, student_id).await?;
        }
    }

    let mut touched_students = Vec::new();
    for seat in seats {
        SeatActiveModel {
            course_id: Set(course_id),
            student_id: Set(seat.student_id),
            year: Set(seat.year.unwrap_or(current_year)),
            mark: Set(seat.mark.filter(|_| seat.student_id.is_some())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| map_unique_violation(e, "同一学生在课程内只能占一个座位"))?;

        if let Some(student_id) = seat.student_id
            && seat.mark.is_some()
        {
            touched_students.push(student_id);
        }
    }

    touched_students.dedup();
    for student_id in touched_students {
        recompute_avg_mark(txn, student_id).await?;
    }

    Ok(())
}
