use super::entities::Course;
use crate::models::common::PaginationInfo;
use crate::models::users::entities::UserBrief;
use serde::Serialize;
use ts_rs::TS;

// 课程详情（含授课教师）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseResponse {
    pub course: Course,
    pub teachers: Vec<UserBrief>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}
