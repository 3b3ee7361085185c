//! 测验作答记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub course_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub status: String,
    pub time_taken: i64,
    pub started_at: i64,
    pub completed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id"
    )]
    Quiz,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(self) -> crate::models::quizzes::entities::QuizAttempt {
        use crate::models::quizzes::entities::{AttemptStatus, QuizAttempt};

        QuizAttempt {
            id: self.id,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
            course_id: self.course_id,
            answers: serde_json::from_str(&self.answers).unwrap_or_default(),
            score: self.score,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            status: self
                .status
                .parse::<AttemptStatus>()
                .unwrap_or(AttemptStatus::Failed),
            time_taken: self.time_taken,
            started_at: super::to_datetime(self.started_at),
            completed_at: super::to_datetime(self.completed_at),
        }
    }
}
