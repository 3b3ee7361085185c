use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 检查数据库连接
    async fn ping(&self) -> Result<()>;

    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 授课教师
    async fn assign_teacher(&self, course_id: i64, teacher_id: i64) -> Result<CourseTeacher>;
    async fn remove_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool>;
    async fn list_course_teachers(&self, course_id: i64) -> Result<Vec<User>>;
    async fn is_course_teacher(&self, course_id: i64, teacher_id: i64) -> Result<bool>;

    /// 选课
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    async fn unenroll_student(&self, student_id: i64, course_id: i64) -> Result<bool>;
    async fn get_enrollment(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>>;

    /// 作业
    async fn create_assessment(&self, assessment: CreateAssessmentRequest) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    async fn list_course_assessments(&self, course_id: i64) -> Result<Vec<Assessment>>;
    async fn update_assessment(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;

    /// 作业提交
    // 重复提交返回 Conflict
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_student_submission(
        &self,
        student_id: i64,
        assessment_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_assessment_submissions(&self, assessment_id: i64) -> Result<Vec<Submission>>;
    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>>;
    async fn list_student_course_submissions(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>>;

    /// 课程资料
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    async fn list_course_materials(&self, course_id: i64) -> Result<Vec<Material>>;
    async fn update_material_state(&self, id: i64, update: MaterialStateUpdate) -> Result<bool>;
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 测验
    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, id: i64) -> Result<Option<Quiz>>;
    async fn list_course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>>;
    async fn list_material_quizzes(&self, material_id: i64) -> Result<Vec<Quiz>>;
    // 软删除
    async fn deactivate_quiz(&self, id: i64) -> Result<bool>;

    /// 测验作答
    // 同一学生同一测验重复作答返回 Conflict
    async fn create_quiz_attempt(&self, attempt: NewQuizAttempt) -> Result<QuizAttempt>;
    async fn get_student_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>>;
    async fn list_quiz_attempts(
        &self,
        quiz_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>>;
    async fn list_course_attempts(&self, course_id: i64) -> Result<Vec<QuizAttempt>>;
    async fn list_student_course_attempts(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<QuizAttempt>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
