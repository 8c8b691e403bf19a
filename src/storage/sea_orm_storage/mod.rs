//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod persons;
mod seats;
mod users;

use crate::config::AppConfig;
use crate::errors::{AcadSysError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcadSysError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcadSysError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AcadSysError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AcadSysError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcadSysError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    // 内存库只允许单连接，多连接会各自拿到独立的空库
    let db = SeaOrmStorage::connect_sqlite("sqlite::memory:", 1, 5)
        .await
        .expect("Failed to open in-memory SQLite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    SeaOrmStorage { db }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 人员模块
    async fn get_person_by_id(&self, id: i64) -> Result<Option<Person>> {
        self.get_person_by_id_impl(id).await
    }

    async fn get_person_by_email(&self, email: &str) -> Result<Option<Person>> {
        self.get_person_by_email_impl(email).await
    }

    async fn list_persons_with_pagination(
        &self,
        query: PersonListQuery,
    ) -> Result<PersonListResponse> {
        self.list_persons_with_pagination_impl(query).await
    }

    async fn count_persons(&self) -> Result<u64> {
        self.count_persons_impl().await
    }

    async fn search_students(&self) -> Result<Vec<StudentSearchItem>> {
        self.search_students_impl().await
    }

    async fn list_professors(&self) -> Result<Vec<Person>> {
        self.list_professors_impl().await
    }

    async fn update_person(&self, person_id: i64, update: UpdateProfileRequest) -> Result<Person> {
        self.update_person_impl(person_id, update).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CourseDetailResponse> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_detail(&self, course_id: i64) -> Result<Option<CourseDetailResponse>> {
        self.get_course_detail_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_all_courses(&self) -> Result<Vec<Course>> {
        self.list_all_courses_impl().await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    async fn get_students_in_course(&self, course_id: i64) -> Result<Vec<Person>> {
        self.get_students_in_course_impl(course_id).await
    }

    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_professor_impl(professor_id).await
    }

    // 选课模块
    async fn assign_student_to_course(&self, student_id: i64, course_id: i64) -> Result<Seat> {
        self.assign_student_to_course_impl(student_id, course_id)
            .await
    }

    async fn unassign_student_from_course(&self, student_id: i64, course_id: i64) -> Result<()> {
        self.unassign_student_from_course_impl(student_id, course_id)
            .await
    }

    async fn set_mark_to_student_in_course(
        &self,
        course_id: i64,
        student_id: i64,
        mark: f64,
    ) -> Result<MarkRecordResponse> {
        self.set_mark_to_student_in_course_impl(course_id, student_id, mark)
            .await
    }

    async fn merge_seats_into_course(
        &self,
        seats: Vec<MergeSeatPayload>,
        course_id: i64,
    ) -> Result<CourseDetailResponse> {
        self.merge_seats_into_course_impl(seats, course_id).await
    }

    async fn can_assign_student_to_course(&self, student_id: i64, course_id: i64) -> Result<bool> {
        self.can_assign_student_to_course_impl(student_id, course_id)
            .await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentItem>> {
        self.list_student_enrollments_impl(student_id).await
    }
}
