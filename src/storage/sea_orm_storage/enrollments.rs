//! 选课存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::Result;
use crate::models::enrollments::entities::Enrollment;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 选课，重复选课返回 Conflict
    pub async fn enroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "选课失败"))?;

        Ok(result.into_enrollment())
    }

    pub async fn unenroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "退课失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询选课记录失败"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_student_enrollments_impl(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询学生选课失败"))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    pub async fn list_course_enrollments_impl(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程选课失败"))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }
}
