//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod courses;
mod enrollments;
mod materials;
mod quizzes;
mod submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{PrepEaseError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
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
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| PrepEaseError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PrepEaseError::database_config(format!("SQLite URL 解析失败: {e}")))?
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
            .map_err(|e| PrepEaseError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PrepEaseError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PrepEaseError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 单连接内存数据库，测试用
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let db = Self::connect_sqlite("sqlite::memory:", 1, 5).await?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }
}

/// 唯一约束冲突映射为 Conflict，其余为数据库操作错误
pub(crate) fn write_error(e: DbErr, context: &str) -> PrepEaseError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            PrepEaseError::conflict(format!("{context}: {detail}"))
        }
        _ => PrepEaseError::database_operation(format!("{context}: {e}")),
    }
}

pub(crate) fn read_error(e: DbErr, context: &str) -> PrepEaseError {
    PrepEaseError::database_operation(format!("{context}: {e}"))
}

// Storage trait 实现
use crate::models::{
    assessments::{
        entities::{Assessment, Submission},
        requests::{CreateAssessmentRequest, NewSubmission, UpdateAssessmentRequest},
    },
    courses::{
        entities::{Course, CourseTeacher},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::entities::Enrollment,
    materials::{
        entities::Material,
        requests::{MaterialStateUpdate, NewMaterial},
    },
    quizzes::{
        entities::{Quiz, QuizAttempt},
        requests::{NewQuiz, NewQuizAttempt},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| PrepEaseError::database_connection(format!("数据库不可用: {e}")))
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(course_code).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn assign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<CourseTeacher> {
        self.assign_teacher_impl(course_id, teacher_id).await
    }

    async fn remove_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        self.remove_teacher_impl(course_id, teacher_id).await
    }

    async fn list_course_teachers(&self, course_id: i64) -> Result<Vec<User>> {
        self.list_course_teachers_impl(course_id).await
    }

    async fn is_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        self.is_course_teacher_impl(course_id, teacher_id).await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_id).await
    }

    async fn unenroll_student(&self, student_id: i64, course_id: i64) -> Result<bool> {
        self.unenroll_student_impl(student_id, course_id).await
    }

    async fn get_enrollment(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        self.list_course_enrollments_impl(course_id).await
    }

    // 作业模块
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment> {
        self.create_assessment_impl(assessment).await
    }

    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>> {
        self.get_assessment_by_id_impl(id).await
    }

    async fn list_course_assessments(&self, course_id: i64) -> Result<Vec<Assessment>> {
        self.list_course_assessments_impl(course_id).await
    }

    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        self.update_assessment_impl(id, update).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<bool> {
        self.delete_assessment_impl(id).await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_student_submission(
        &self,
        student_id: i64,
        assessment_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_student_submission_impl(student_id, assessment_id)
            .await
    }

    async fn list_assessment_submissions(&self, assessment_id: i64) -> Result<Vec<Submission>> {
        self.list_assessment_submissions_impl(assessment_id).await
    }

    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>> {
        self.list_course_submissions_impl(course_id).await
    }

    async fn list_student_course_submissions(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_student_course_submissions_impl(student_id, course_id)
            .await
    }

    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, score, feedback, graded_by)
            .await
    }

    // 资料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_course_materials(&self, course_id: i64) -> Result<Vec<Material>> {
        self.list_course_materials_impl(course_id).await
    }

    async fn update_material_state(&self, id: i64, update: MaterialStateUpdate) -> Result<bool> {
        self.update_material_state_impl(id, update).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 测验模块
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        self.create_quiz_impl(quiz).await
    }

    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(id).await
    }

    async fn list_course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>> {
        self.list_course_quizzes_impl(course_id).await
    }

    async fn list_material_quizzes(&self, material_id: i64) -> Result<Vec<Quiz>> {
        self.list_material_quizzes_impl(material_id).await
    }

    async fn deactivate_quiz(&self, id: i64) -> Result<bool> {
        self.deactivate_quiz_impl(id).await
    }

    async fn create_quiz_attempt(&self, attempt: NewQuizAttempt) -> Result<QuizAttempt> {
        self.create_quiz_attempt_impl(attempt).await
    }

    async fn get_student_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        self.get_student_quiz_attempt_impl(quiz_id, student_id)
            .await
    }

    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        self.list_quiz_attempts_impl(quiz_id, student_id).await
    }

    async fn list_course_attempts(&self, course_id: i64) -> Result<Vec<QuizAttempt>> {
        self.list_course_attempts_impl(course_id).await
    }

    async fn list_student_course_attempts(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<QuizAttempt>> {
        self.list_student_course_attempts_impl(student_id, course_id)
            .await
    }
}
