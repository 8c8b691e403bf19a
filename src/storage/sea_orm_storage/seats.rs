//! 选课存储操作
//!
//! 座位分配、退课、成绩录入与平均分重算都在这里，每个操作一个事务。
//! 抢座用带 `student_id IS NULL` 条件的 UPDATE 完成，两个并发请求抢同
//! 一个座位时只有一个 rows_affected 为 1，落败方换下一个空座位重试。

use super::SeaOrmStorage;
use super::courses::{course_detail, ensure_student_exists};
use super::persons::load_person;
use super::users::map_unique_violation;
use crate::entity::courses::Entity as Courses;
use crate::entity::persons::{Column as PersonColumn, Entity as Persons};
use crate::entity::seats::{
    ActiveModel as SeatActiveModel, Column as SeatColumn, Entity as Seats, Model as SeatModel,
};
use crate::errors::{AcadSysError, Result};
use crate::models::{
    courses::{
        entities::Seat,
        requests::MergeSeatPayload,
        responses::{CourseDetailResponse, EnrollmentItem, MarkRecordResponse},
    },
    persons::entities::PersonDetail,
    persons::responses::StudentSummary,
};
use chrono::Datelike;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 重算学生平均分并写回
///
/// 平均分是派生值：学生所有座位上非空成绩的均值，一个成绩都没有时为 0.0。
/// 必须与触发它的成绩/座位变更在同一事务内执行。
pub(super) async fn recompute_avg_mark(db: &impl ConnectionTrait, student_id: i64) -> Result<f64> {
    let marks: Vec<Option<f64>> = Seats::find()
        .select_only()
        .column(SeatColumn::Mark)
        .filter(SeatColumn::StudentId.eq(student_id))
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询成绩失败: {e}")))?;

    let graded: Vec<f64> = marks.into_iter().flatten().collect();
    let avg = if graded.is_empty() {
        0.0
    } else {
        graded.iter().sum::<f64>() / graded.len() as f64
    };

    Persons::update_many()
        .col_expr(PersonColumn::AvgMark, Expr::value(avg))
        .col_expr(
            PersonColumn::UpdatedAt,
            Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(PersonColumn::Id.eq(student_id))
        .exec(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("更新平均分失败: {e}")))?;

    Ok(avg)
}

/// 查找学生在课程内占用的座位
async fn find_occupied_seat(
    db: &impl ConnectionTrait,
    course_id: i64,
    student_id: i64,
) -> Result<Option<SeatModel>> {
    Seats::find()
        .filter(SeatColumn::CourseId.eq(course_id))
        .filter(SeatColumn::StudentId.eq(student_id))
        .one(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询座位失败: {e}")))
}

/// 课程必须存在，缺失时报 NotFound
async fn ensure_course_exists(db: &impl ConnectionTrait, course_id: i64) -> Result<()> {
    let count = Courses::find_by_id(course_id)
        .count(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询课程失败: {e}")))?;
    if count == 0 {
        return Err(AcadSysError::not_found(format!(
            "未找到 ID 为 {course_id} 的课程"
        )));
    }
    Ok(())
}

/// 学生人员记录必须存在，缺失时报 NotFound
async fn ensure_student_found(db: &impl ConnectionTrait, student_id: i64) -> Result<()> {
    let count = Persons::find()
        .filter(PersonColumn::Id.eq(student_id))
        .filter(PersonColumn::Kind.eq(PersonDetail::STUDENT))
        .count(db)
        .await
        .map_err(|e| AcadSysError::database_operation(format!("查询学生失败: {e}")))?;
    if count == 0 {
        return Err(AcadSysError::not_found(format!(
            "未找到 ID 为 {student_id} 的学生"
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 把学生分配到课程的一个空座位
    ///
    /// 同一课程不允许重复选课（任何年度）；没有空座位时报课程已满。
    /// 座位按 ID 从小到大认领，同一次调用内结果确定。
    pub async fn assign_student_to_course_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Seat> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_course_exists(&txn, course_id).await?;
        ensure_student_found(&txn, student_id).await?;

        if find_occupied_seat(&txn, course_id, student_id).await?.is_some() {
            return Err(AcadSysError::validation(format!(
                "学生 {student_id} 已经选了课程 {course_id}"
            )));
        }

        // 逐个认领空座位，抢不到（并发对手先到）就换下一个
        let claimed = loop {
            let candidate = Seats::find()
                .filter(SeatColumn::CourseId.eq(course_id))
                .filter(SeatColumn::StudentId.is_null())
                .order_by_asc(SeatColumn::Id)
                .one(&txn)
                .await
                .map_err(|e| AcadSysError::database_operation(format!("查询空座位失败: {e}")))?;

            let Some(seat) = candidate else {
                return Err(AcadSysError::validation(format!(
                    "课程 {course_id} 已满，没有空座位"
                )));
            };

            let result = Seats::update_many()
                .col_expr(SeatColumn::StudentId, Expr::value(student_id))
                .col_expr(SeatColumn::UpdatedAt, Expr::value(now))
                .filter(SeatColumn::Id.eq(seat.id))
                .filter(SeatColumn::StudentId.is_null())
                .exec(&txn)
                .await
                .map_err(|e| map_unique_violation(e, "同一学生在课程内只能占一个座位"))?;

            if result.rows_affected > 0 {
                break seat.id;
            }
        };

        let seat = Seats::find_by_id(claimed)
            .one(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询座位失败: {e}")))?
            .ok_or_else(|| AcadSysError::database_operation("认领的座位消失了"))?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(seat.into_seat())
    }

    /// 把学生从课程座位上移除
    ///
    /// 座位上的成绩一并清除（重新选课从未评分开始），随后重算该学生平均分。
    pub async fn unassign_student_from_course_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_course_exists(&txn, course_id).await?;

        let seat = find_occupied_seat(&txn, course_id, student_id)
            .await?
            .ok_or_else(|| {
                AcadSysError::validation(format!(
                    "学生 {student_id} 在课程 {course_id} 没有座位"
                ))
            })?;

        let mut model: SeatActiveModel = seat.into();
        model.student_id = Set(None);
        model.mark = Set(None);
        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("更新座位失败: {e}")))?;

        recompute_avg_mark(&txn, student_id).await?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 录入成绩并重算学生平均分
    pub async fn set_mark_to_student_in_course_impl(
        &self,
        course_id: i64,
        student_id: i64,
        mark: f64,
    ) -> Result<MarkRecordResponse> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_course_exists(&txn, course_id).await?;

        let seat = find_occupied_seat(&txn, course_id, student_id)
            .await?
            .ok_or_else(|| {
                AcadSysError::validation(format!(
                    "学生 {student_id} 在课程 {course_id} 没有座位"
                ))
            })?;
        let year = seat.year;

        let mut model: SeatActiveModel = seat.into();
        model.mark = Set(Some(mark));
        model.updated_at = Set(now);
        model
            .update(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("更新座位失败: {e}")))?;

        let avg = recompute_avg_mark(&txn, student_id).await?;

        let student = load_person(&txn, student_id)
            .await?
            .ok_or_else(|| AcadSysError::not_found(format!("未找到 ID 为 {student_id} 的学生")))?;
        let student_number = match &student.detail {
            PersonDetail::Student { student_number, .. } => student_number.clone(),
            PersonDetail::Professor { .. } => String::new(),
        };

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(MarkRecordResponse {
            year,
            student: StudentSummary {
                id: student.id,
                name: student.name,
                student_number,
                avg_mark: avg,
            },
            mark,
        })
    }

    /// 批量并入已绑定学生的座位
    ///
    /// 先整体校验（每个座位都有学生、课程 ID 与目标一致、学生存在），
    /// 全部通过后才开始写入。
    pub async fn merge_seats_into_course_impl(
        &self,
        seats: Vec<MergeSeatPayload>,
        course_id: i64,
    ) -> Result<CourseDetailResponse> {
        let now = chrono::Utc::now().timestamp();
        let current_year = chrono::Utc::now().year();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("开启事务失败: {e}")))?;

        let course = Courses::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| {
                AcadSysError::not_found(format!("未找到 ID 为 {course_id} 的课程"))
            })?;

        for (index, seat) in seats.iter().enumerate() {
            if seat.student_id.is_none() {
                return Err(AcadSysError::validation(format!(
                    "第 {} 个座位没有绑定学生",
                    index + 1
                )));
            }
            if seat.course_id != course_id {
                return Err(AcadSysError::validation(format!(
                    "第 {} 个座位声明的课程 {} 与目标课程 {} 不一致",
                    index + 1,
                    seat.course_id,
                    course_id
                )));
            }
        }
        for seat in &seats {
            if let Some(student_id) = seat.student_id {
                ensure_student_exists(&txn, student_id).await?;
            }
        }

        let mut touched_students = Vec::new();
        for seat in &seats {
            SeatActiveModel {
                course_id: Set(course_id),
                student_id: Set(seat.student_id),
                year: Set(seat.year.unwrap_or(current_year)),
                mark: Set(seat.mark),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
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
            recompute_avg_mark(&txn, student_id).await?;
        }

        let detail = course_detail(&txn, course).await?;

        txn.commit()
            .await
            .map_err(|e| AcadSysError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(detail)
    }

    /// 选课资格预检
    ///
    /// 学生在该课程没有座位时为 true；不检查课程是否有空位，
    /// 真正的分配操作自己会报课程已满。
    pub async fn can_assign_student_to_course_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<bool> {
        ensure_student_found(&self.db, student_id).await?;

        let occupied = Seats::find()
            .filter(SeatColumn::CourseId.eq(course_id))
            .filter(SeatColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询座位失败: {e}")))?;

        Ok(occupied == 0)
    }

    /// 学生视角的选课记录
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentItem>> {
        let rows = Seats::find()
            .find_also_related(Courses)
            .filter(SeatColumn::StudentId.eq(student_id))
            .order_by_asc(SeatColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(seat, course)| {
                course.map(|course| EnrollmentItem {
                    course: course.into_course(),
                    year: seat.year,
                    mark: seat.mark,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use crate::errors::AcadSysError;
    use crate::models::courses::requests::{
        CreateCourseRequest, MergeSeatPayload, SeatPayload,
    };
    use crate::models::persons::entities::{Address, PersonDetail};
    use crate::models::users::entities::Role;
    use crate::models::users::requests::{CreateUserRequest, PersonPayload};

    async fn create_student(
        storage: &super::SeaOrmStorage,
        username: &str,
        email: &str,
    ) -> i64 {
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                password: "hashed".to_string(),
                role: Role::Student,
                person: Some(PersonPayload::Student {
                    name: format!("Student {username}"),
                    phone: "555-0000".to_string(),
                    email: email.to_string(),
                    address: None,
                }),
            })
            .await
            .expect("create student user");
        user.person_id.expect("student user has a person")
    }

    async fn create_professor(storage: &super::SeaOrmStorage, username: &str, email: &str) -> i64 {
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                password: "hashed".to_string(),
                role: Role::Professor,
                person: Some(PersonPayload::Professor {
                    name: format!("Prof {username}"),
                    phone: "555-0001".to_string(),
                    email: email.to_string(),
                    address: Some(Address {
                        street: "1 Campus Way".to_string(),
                        city: "Springfield".to_string(),
                        state: "IL".to_string(),
                        country: "US".to_string(),
                    }),
                    salary: Some(4200.0),
                }),
            })
            .await
            .expect("create professor user");
        user.person_id.expect("professor user has a person")
    }

    async fn create_course(
        storage: &super::SeaOrmStorage,
        name: &str,
        professor_id: i64,
        seats_amount: u32,
    ) -> i64 {
        storage
            .create_course_impl(CreateCourseRequest {
                name: name.to_string(),
                professor_id,
                seats_amount: Some(seats_amount),
                seats: None,
            })
            .await
            .expect("create course")
            .id
    }

    async fn student_avg(storage: &super::SeaOrmStorage, student_id: i64) -> f64 {
        let person = storage
            .get_person_by_id_impl(student_id)
            .await
            .expect("load student")
            .expect("student exists");
        match person.detail {
            PersonDetail::Student { avg_mark, .. } => avg_mark,
            PersonDetail::Professor { .. } => panic!("expected a student"),
        }
    }

    #[tokio::test]
    async fn test_create_course_with_empty_seats() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_codd", "codd@example.edu").await;

        let detail = storage
            .create_course_impl(CreateCourseRequest {
                name: "Databases".to_string(),
                professor_id: prof,
                seats_amount: Some(3),
                seats: None,
            })
            .await
            .unwrap();

        assert_eq!(detail.seats.len(), 3);
        assert!(detail.seats.iter().all(|s| s.student_id.is_none()));
        assert!(detail.seats.iter().all(|s| s.mark.is_none()));
        assert_eq!(storage.count_courses_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_course_rejects_blank_name_and_unknown_professor() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_gray", "gray@example.edu").await;

        let blank = storage
            .create_course_impl(CreateCourseRequest {
                name: "   ".to_string(),
                professor_id: prof,
                seats_amount: Some(1),
                seats: None,
            })
            .await;
        assert!(matches!(blank, Err(AcadSysError::Validation(_))));

        let missing = storage
            .create_course_impl(CreateCourseRequest {
                name: "Ghost Course".to_string(),
                professor_id: 9999,
                seats_amount: Some(1),
                seats: None,
            })
            .await;
        assert!(matches!(missing, Err(AcadSysError::Validation(_))));
    }

    #[tokio::test]
    async fn test_students_cannot_teach_courses() {
        let storage = memory_storage().await;
        let student = create_student(&storage, "stud_rota", "rota@example.edu").await;

        let result = storage
            .create_course_impl(CreateCourseRequest {
                name: "Combinatorics".to_string(),
                professor_id: student,
                seats_amount: Some(1),
                seats: None,
            })
            .await;
        assert!(matches!(result, Err(AcadSysError::Validation(_))));
    }

    #[tokio::test]
    async fn test_assign_claims_lowest_free_seat() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_dijkstra", "ewd@example.edu").await;
        let course = create_course(&storage, "Algorithms", prof, 2).await;
        let s1 = create_student(&storage, "stud_ana", "ana@example.edu").await;

        let seat = storage
            .assign_student_to_course_impl(s1, course)
            .await
            .unwrap();
        assert_eq!(seat.student_id, Some(s1));

        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        let occupied: Vec<_> = detail
            .seats
            .iter()
            .filter(|s| s.student_id.is_some())
            .collect();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].id, detail.seats[0].id);
    }

    #[tokio::test]
    async fn test_assign_rejects_duplicate_enrollment() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_kay", "kay@example.edu").await;
        let course = create_course(&storage, "Smalltalk", prof, 2).await;
        let s1 = create_student(&storage, "stud_bob", "bob@example.edu").await;

        storage.assign_student_to_course_impl(s1, course).await.unwrap();
        let again = storage.assign_student_to_course_impl(s1, course).await;
        assert!(matches!(again, Err(AcadSysError::Validation(_))));

        // 失败之后座位状态不变
        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        assert_eq!(detail.seats.len(), 2);
        assert_eq!(
            detail.seats.iter().filter(|s| s.student_id.is_some()).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_assign_rejects_full_course() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_ritchie", "dmr@example.edu").await;
        let course = create_course(&storage, "Operating Systems", prof, 1).await;
        let s1 = create_student(&storage, "stud_ken", "ken@example.edu").await;
        let s2 = create_student(&storage, "stud_brian", "brian@example.edu").await;

        storage.assign_student_to_course_impl(s1, course).await.unwrap();
        let full = storage.assign_student_to_course_impl(s2, course).await;
        assert!(matches!(full, Err(AcadSysError::Validation(_))));

        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        assert_eq!(detail.seats.len(), 1);
        assert_eq!(detail.seats[0].student_id, Some(s1));
    }

    #[tokio::test]
    async fn test_assign_missing_course_or_student_is_not_found() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_lamport", "lamport@example.edu").await;
        let course = create_course(&storage, "Distributed Systems", prof, 1).await;
        let s1 = create_student(&storage, "stud_lynn", "lynn@example.edu").await;

        let no_course = storage.assign_student_to_course_impl(s1, 9999).await;
        assert!(matches!(no_course, Err(AcadSysError::NotFound(_))));

        let no_student = storage.assign_student_to_course_impl(9999, course).await;
        assert!(matches!(no_student, Err(AcadSysError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_mark_recomputes_average() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_knuth", "taocp@example.edu").await;
        let algo = create_course(&storage, "Algorithms", prof, 2).await;
        let data = create_course(&storage, "Data Structures", prof, 2).await;
        let s1 = create_student(&storage, "stud_carla", "carla@example.edu").await;

        storage.assign_student_to_course_impl(s1, algo).await.unwrap();
        storage.assign_student_to_course_impl(s1, data).await.unwrap();

        let record = storage
            .set_mark_to_student_in_course_impl(algo, s1, 8.0)
            .await
            .unwrap();
        assert_eq!(record.mark, 8.0);
        assert_eq!(record.student.id, s1);
        // 第二门课还没有成绩，均值只看已有成绩
        assert_eq!(record.student.avg_mark, 8.0);
        assert_eq!(student_avg(&storage, s1).await, 8.0);

        storage
            .set_mark_to_student_in_course_impl(data, s1, 6.0)
            .await
            .unwrap();
        assert_eq!(student_avg(&storage, s1).await, 7.0);
    }

    #[tokio::test]
    async fn test_set_mark_requires_enrollment() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_backus", "backus@example.edu").await;
        let course = create_course(&storage, "Fortran", prof, 1).await;
        let s1 = create_student(&storage, "stud_jean", "jean@example.edu").await;

        let result = storage
            .set_mark_to_student_in_course_impl(course, s1, 9.0)
            .await;
        assert!(matches!(result, Err(AcadSysError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unassign_clears_seat_and_recomputes_average() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_mccarthy", "lisp@example.edu").await;
        let lisp = create_course(&storage, "Lisp", prof, 1).await;
        let logic = create_course(&storage, "Logic", prof, 1).await;
        let s1 = create_student(&storage, "stud_dana", "dana@example.edu").await;

        storage.assign_student_to_course_impl(s1, lisp).await.unwrap();
        storage.assign_student_to_course_impl(s1, logic).await.unwrap();
        storage
            .set_mark_to_student_in_course_impl(lisp, s1, 9.0)
            .await
            .unwrap();
        storage
            .set_mark_to_student_in_course_impl(logic, s1, 5.0)
            .await
            .unwrap();
        assert_eq!(student_avg(&storage, s1).await, 7.0);

        storage
            .unassign_student_from_course_impl(s1, lisp)
            .await
            .unwrap();

        // 座位回到空置状态，成绩一并丢弃
        let detail = storage.get_course_detail_impl(lisp).await.unwrap().unwrap();
        assert_eq!(detail.seats[0].student_id, None);
        assert_eq!(detail.seats[0].mark, None);
        // 均值只剩另一门课的成绩
        assert_eq!(student_avg(&storage, s1).await, 5.0);
    }

    #[tokio::test]
    async fn test_unassign_requires_enrollment() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_hoare", "hoare@example.edu").await;
        let course = create_course(&storage, "CSP", prof, 1).await;
        let s1 = create_student(&storage, "stud_tony", "tony@example.edu").await;

        let result = storage.unassign_student_from_course_impl(s1, course).await;
        assert!(matches!(result, Err(AcadSysError::Validation(_))));
    }

    #[tokio::test]
    async fn test_merge_seats_validates_before_writing() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_liskov", "liskov@example.edu").await;
        let course = create_course(&storage, "Abstraction", prof, 0).await;
        let s1 = create_student(&storage, "stud_mia", "mia@example.edu").await;

        // 没绑定学生的座位整批拒绝
        let unbound = storage
            .merge_seats_into_course_impl(
                vec![MergeSeatPayload {
                    course_id: course,
                    student_id: None,
                    year: None,
                    mark: None,
                }],
                course,
            )
            .await;
        assert!(matches!(unbound, Err(AcadSysError::Validation(_))));

        // 课程 ID 不一致也整批拒绝
        let mismatched = storage
            .merge_seats_into_course_impl(
                vec![MergeSeatPayload {
                    course_id: course + 1,
                    student_id: Some(s1),
                    year: None,
                    mark: None,
                }],
                course,
            )
            .await;
        assert!(matches!(mismatched, Err(AcadSysError::Validation(_))));

        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        assert!(detail.seats.is_empty());
    }

    #[tokio::test]
    async fn test_merge_seats_inserts_and_recomputes() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_floyd", "floyd@example.edu").await;
        let course = create_course(&storage, "Program Proofs", prof, 0).await;
        let s1 = create_student(&storage, "stud_leo", "leo@example.edu").await;

        let detail = storage
            .merge_seats_into_course_impl(
                vec![MergeSeatPayload {
                    course_id: course,
                    student_id: Some(s1),
                    year: Some(2026),
                    mark: Some(9.5),
                }],
                course,
            )
            .await
            .unwrap();

        assert_eq!(detail.seats.len(), 1);
        assert_eq!(detail.seats[0].student_id, Some(s1));
        assert_eq!(detail.seats[0].mark, Some(9.5));
        assert_eq!(student_avg(&storage, s1).await, 9.5);
    }

    #[tokio::test]
    async fn test_can_assign_preflight() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_turing", "turing@example.edu").await;
        let course = create_course(&storage, "Computability", prof, 1).await;
        let s1 = create_student(&storage, "stud_alan", "alan@example.edu").await;

        assert!(storage
            .can_assign_student_to_course_impl(s1, course)
            .await
            .unwrap());

        storage.assign_student_to_course_impl(s1, course).await.unwrap();
        assert!(!storage
            .can_assign_student_to_course_impl(s1, course)
            .await
            .unwrap());

        let missing = storage.can_assign_student_to_course_impl(9999, course).await;
        assert!(matches!(missing, Err(AcadSysError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_enrollment_listing_for_student() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_perlis", "perlis@example.edu").await;
        let algol = create_course(&storage, "ALGOL", prof, 1).await;
        let epigrams = create_course(&storage, "Epigrams", prof, 1).await;
        let s1 = create_student(&storage, "stud_zoe", "zoe@example.edu").await;

        storage.assign_student_to_course_impl(s1, algol).await.unwrap();
        storage.assign_student_to_course_impl(s1, epigrams).await.unwrap();
        storage
            .set_mark_to_student_in_course_impl(algol, s1, 8.5)
            .await
            .unwrap();

        let enrollments = storage.list_student_enrollments_impl(s1).await.unwrap();
        assert_eq!(enrollments.len(), 2);
        assert_eq!(enrollments[0].course.id, algol);
        assert_eq!(enrollments[0].mark, Some(8.5));
        assert_eq!(enrollments[1].mark, None);
    }

    #[tokio::test]
    async fn test_create_course_with_prebuilt_seats() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_wirth", "wirth@example.edu").await;
        let s1 = create_student(&storage, "stud_pam", "pam@example.edu").await;

        let detail = storage
            .create_course_impl(CreateCourseRequest {
                name: "Pascal".to_string(),
                professor_id: prof,
                seats_amount: None,
                seats: Some(vec![
                    SeatPayload {
                        student_id: Some(s1),
                        year: Some(2025),
                        mark: Some(7.0),
                    },
                    SeatPayload {
                        student_id: None,
                        year: None,
                        mark: None,
                    },
                ]),
            })
            .await
            .unwrap();

        assert_eq!(detail.seats.len(), 2);
        assert_eq!(detail.seats[0].student_id, Some(s1));
        assert_eq!(detail.seats[0].mark, Some(7.0));
        assert_eq!(detail.seats[0].year, 2025);
        assert!(detail.seats[1].student_id.is_none());
        assert_eq!(student_avg(&storage, s1).await, 7.0);
    }

    // 两座位课程完整走一遍：选课、重复选课、评分、退课
    #[tokio::test]
    async fn test_full_enrollment_scenario() {
        let storage = memory_storage().await;
        let prof = create_professor(&storage, "prof_cormen", "clrs@example.edu").await;
        let course = create_course(&storage, "Algorithms", prof, 2).await;
        let s1 = create_student(&storage, "stud_sara", "sara@example.edu").await;

        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        assert_eq!(detail.seats.len(), 2);
        assert!(detail.seats.iter().all(|s| s.student_id.is_none()));

        let seat = storage.assign_student_to_course_impl(s1, course).await.unwrap();
        assert_eq!(seat.student_id, Some(s1));

        let again = storage.assign_student_to_course_impl(s1, course).await;
        assert!(matches!(again, Err(AcadSysError::Validation(_))));

        let record = storage
            .set_mark_to_student_in_course_impl(course, s1, 8.5)
            .await
            .unwrap();
        assert_eq!(record.mark, 8.5);
        assert_eq!(student_avg(&storage, s1).await, 8.5);

        storage.unassign_student_from_course_impl(s1, course).await.unwrap();
        let detail = storage.get_course_detail_impl(course).await.unwrap().unwrap();
        assert!(detail.seats.iter().all(|s| s.student_id.is_none()));
        assert!(detail.seats.iter().all(|s| s.mark.is_none()));
        assert_eq!(student_avg(&storage, s1).await, 0.0);
    }
}
