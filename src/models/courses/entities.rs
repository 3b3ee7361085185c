use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    // 开课学期
    #[ts(export, export_to = "course.ts")]
    pub enum Semester {
        Fall => "fall",
        Spring => "spring",
        Summer => "summer",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    pub id: i64,
    // 课程代码，全局唯一
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i32,
    pub semester: Semester,
    pub year: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程与授课教师的关联
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseTeacher {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}
