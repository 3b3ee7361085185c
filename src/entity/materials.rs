//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    pub file_name: String,
    pub stored_name: String,
    pub file_type: String,
    pub status: String,
    pub ai_status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_content: Option<String>,
    pub chunk_count: i32,
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
    #[sea_orm(has_many = "super::quizzes::Entity")]
    Quizzes,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::{
            AiStatus, Material, MaterialFileType, MaterialStatus,
        };

        Material {
            id: self.id,
            course_id: self.course_id,
            uploaded_by: self.uploaded_by,
            title: self.title,
            file_name: self.file_name,
            stored_name: self.stored_name,
            file_type: self
                .file_type
                .parse::<MaterialFileType>()
                .unwrap_or(MaterialFileType::Txt),
            status: self
                .status
                .parse::<MaterialStatus>()
                .unwrap_or(MaterialStatus::Pending),
            ai_status: self
                .ai_status
                .parse::<AiStatus>()
                .unwrap_or(AiStatus::Pending),
            text_content: self.text_content,
            chunk_count: self.chunk_count,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
