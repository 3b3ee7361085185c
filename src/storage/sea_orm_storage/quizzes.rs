//! 测验与作答记录存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::quiz_attempts::{
    ActiveModel as AttemptActiveModel, Column as AttemptColumn, Entity as QuizAttempts,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::Result;
use crate::models::quizzes::{
    entities::{Quiz, QuizAttempt},
    requests::{NewQuiz, NewQuizAttempt},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_quiz_impl(&self, req: NewQuiz) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            material_id: Set(req.material_id),
            created_by: Set(req.created_by),
            title: Set(req.title),
            description: Set(req.description),
            time_limit: Set(req.time_limit),
            passing_score: Set(req.passing_score),
            show_answers: Set(req.show_answers),
            shuffle_questions: Set(req.shuffle_questions),
            difficulty: Set(req.difficulty.to_string()),
            question_count: Set(req.questions.len() as i32),
            questions: Set(serde_json::to_string(&req.questions)?),
            is_active: Set(true),
            generated_by: Set(req.generated_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "创建测验失败"))?;

        Ok(result.into_quiz())
    }

    pub async fn get_quiz_by_id_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询测验失败"))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 课程下未删除的测验
    pub async fn list_course_quizzes_impl(&self, course_id: i64) -> Result<Vec<Quiz>> {
        let result = Quizzes::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::IsActive.eq(true)),
            )
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程测验失败"))?;

        Ok(result.into_iter().map(|m| m.into_quiz()).collect())
    }

    pub async fn list_material_quizzes_impl(&self, material_id: i64) -> Result<Vec<Quiz>> {
        let result = Quizzes::find()
            .filter(
                Condition::all()
                    .add(Column::MaterialId.eq(material_id))
                    .add(Column::IsActive.eq(true)),
            )
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询资料测验失败"))?;

        Ok(result.into_iter().map(|m| m.into_quiz()).collect())
    }

    pub async fn deactivate_quiz_impl(&self, id: i64) -> Result<bool> {
        let result = Quizzes::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "删除测验失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 保存作答，已作答过返回 Conflict 且原记录不变
    pub async fn create_quiz_attempt_impl(&self, req: NewQuizAttempt) -> Result<QuizAttempt> {
        let model = AttemptActiveModel {
            quiz_id: Set(req.quiz_id),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            answers: Set(serde_json::to_string(&req.answers)?),
            score: Set(req.score),
            total_questions: Set(req.total_questions),
            correct_answers: Set(req.correct_answers),
            status: Set(req.status.to_string()),
            time_taken: Set(req.time_taken),
            started_at: Set(req.started_at.timestamp()),
            completed_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "保存作答失败"))?;

        Ok(result.into_attempt())
    }

    pub async fn get_student_quiz_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(
                Condition::all()
                    .add(AttemptColumn::QuizId.eq(quiz_id))
                    .add(AttemptColumn::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询作答记录失败"))?;

        Ok(result.map(|m| m.into_attempt()))
    }

    /// 测验作答记录，最新的在前
    pub async fn list_quiz_attempts_impl(
        &self,
        quiz_id: i64,
        student_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        let mut condition = Condition::all().add(AttemptColumn::QuizId.eq(quiz_id));
        if let Some(student_id) = student_id {
            condition = condition.add(AttemptColumn::StudentId.eq(student_id));
        }

        let result = QuizAttempts::find()
            .filter(condition)
            .order_by_desc(AttemptColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询作答记录失败"))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }

    pub async fn list_course_attempts_impl(&self, course_id: i64) -> Result<Vec<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(AttemptColumn::CourseId.eq(course_id))
            .order_by_desc(AttemptColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程作答记录失败"))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }

    pub async fn list_student_course_attempts_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(
                Condition::all()
                    .add(AttemptColumn::CourseId.eq(course_id))
                    .add(AttemptColumn::StudentId.eq(student_id)),
            )
            .order_by_desc(AttemptColumn::CompletedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询学生作答记录失败"))?;

        Ok(result.into_iter().map(|m| m.into_attempt()).collect())
    }
}
