use super::entities::Semester;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_credits")]
    pub credits: i32,
    pub semester: Semester,
    pub year: i32,
}

fn default_credits() -> i32 {
    3
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub semester: Option<Semester>,
    pub year: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub semester: Option<Semester>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct AssignTeacherRequest {
    pub teacher_id: i64,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub semester: Option<Semester>,
    pub year: Option<i32>,
    // 仅列出该教师任教的课程
    pub teacher_id: Option<i64>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        Self {
            page: params.pagination.page(),
            size: params.pagination.size(),
            search: params.search,
            semester: params.semester,
            year: params.year,
            teacher_id: None,
        }
    }
}
