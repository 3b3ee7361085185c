pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod teachers;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    AssignTeacherRequest, CourseListParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_course_code;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::common::storage_from_request(&self.storage, request)
    }

    pub async fn create_course(
        &self,
        course: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course, request).await
    }

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    // 当前教师任教的课程
    pub async fn list_my_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_courses(self, query, request).await
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, course_id, update, request).await
    }

    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, course_id, request).await
    }

    pub async fn assign_teacher(
        &self,
        course_id: i64,
        body: AssignTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::assign_teacher(self, course_id, body.teacher_id, request).await
    }

    pub async fn remove_teacher(
        &self,
        course_id: i64,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::remove_teacher(self, course_id, teacher_id, request).await
    }
}

// 学分与年份的合理范围
const CREDIT_RANGE: std::ops::RangeInclusive<i32> = 1..=10;
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

pub(crate) fn validate_course_fields(
    course_code: Option<&str>,
    title: Option<&str>,
    credits: Option<i32>,
    year: Option<i32>,
) -> Result<(), HttpResponse> {
    let invalid = |msg: String| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
    };

    if let Some(code) = course_code
        && let Err(msg) = validate_course_code(code)
    {
        return Err(invalid(msg.to_string()));
    }
    if let Some(title) = title
        && (title.trim().is_empty() || title.chars().count() > 200)
    {
        return Err(invalid(
            "Title length must be between 1 and 200 characters".to_string(),
        ));
    }
    if let Some(credits) = credits
        && !CREDIT_RANGE.contains(&credits)
    {
        return Err(invalid(format!(
            "Credits must be between {} and {}",
            CREDIT_RANGE.start(),
            CREDIT_RANGE.end()
        )));
    }
    if let Some(year) = year
        && !YEAR_RANGE.contains(&year)
    {
        return Err(invalid(format!(
            "Year must be between {} and {}",
            YEAR_RANGE.start(),
            YEAR_RANGE.end()
        )));
    }
    Ok(())
}
