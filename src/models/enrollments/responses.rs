use super::entities::Enrollment;
use crate::models::courses::entities::Course;
use crate::models::performance::{PerformanceSummary, StudentCourseReport};
use crate::models::users::entities::UserBrief;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct EnrollmentResponse {
    pub enrollment: Enrollment,
}

// 学生已选课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct MyCourseItem {
    pub course: Course,
    pub teachers: Vec<UserBrief>,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct MyCoursesResponse {
    pub items: Vec<MyCourseItem>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct RosterEntry {
    pub student: UserBrief,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub performance: PerformanceSummary,
}

/// 课程花名册（教师视图）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct CourseRosterResponse {
    pub course: Course,
    pub students: Vec<RosterEntry>,
    pub total_students: i64,
}

/// 学生在课程中的详细表现
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "enrollment.ts")]
pub struct StudentCourseDetailsResponse {
    pub course: Course,
    pub student: UserBrief,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub report: StudentCourseReport,
}
