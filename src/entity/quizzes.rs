//! 测验实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub material_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub time_limit: i32,
    pub passing_score: i32,
    pub show_answers: bool,
    pub shuffle_questions: bool,
    pub difficulty: String,
    /// JSON 数组
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub question_count: i32,
    pub is_active: bool,
    pub generated_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::materials::Entity",
        from = "Column::MaterialId",
        to = "super::materials::Column::Id"
    )]
    Material,
    #[sea_orm(has_many = "super::quiz_attempts::Entity")]
    Attempts,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::quizzes::entities::{Quiz, QuizDifficulty, QuizSource};

        Quiz {
            id: self.id,
            course_id: self.course_id,
            material_id: self.material_id,
            created_by: self.created_by,
            title: self.title,
            description: self.description,
            time_limit: self.time_limit,
            passing_score: self.passing_score,
            show_answers: self.show_answers,
            shuffle_questions: self.shuffle_questions,
            difficulty: self.difficulty.parse::<QuizDifficulty>().unwrap_or_default(),
            questions: serde_json::from_str(&self.questions).unwrap_or_default(),
            question_count: self.question_count,
            is_active: self.is_active,
            generated_by: self
                .generated_by
                .parse::<QuizSource>()
                .unwrap_or(QuizSource::Manual),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
