pub mod details;
pub mod enroll;
pub mod my_courses;
pub mod roster;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::EnrollRequest;
use crate::models::users::entities::{User, UserRole};
use crate::services::common::forbidden;
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(
        &self,
        request: &HttpRequest,
    ) -> Result<Arc<dyn Storage>, HttpResponse> {
        super::common::storage_from_request(&self.storage, request)
    }

    pub async fn enroll(
        &self,
        body: EnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll(self, body.course_id, request).await
    }

    pub async fn unenroll(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enroll::unenroll(self, course_id, request).await
    }

    pub async fn my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my_courses::list_my_courses(self, request).await
    }

    pub async fn my_course_details(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        details::my_course_details(self, course_id, request).await
    }

    pub async fn course_roster(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::course_roster(self, course_id, request).await
    }

    pub async fn student_course_details(
        &self,
        course_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        details::student_course_details(self, course_id, student_id, request).await
    }
}

// 选课相关操作只对学生开放
fn require_student(user: &User, action: &str) -> Result<(), HttpResponse> {
    if user.role != UserRole::Student {
        return Err(forbidden(format!("Only students can {action}")));
    }
    Ok(())
}
