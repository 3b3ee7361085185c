//! 作业提交存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::Result;
use crate::models::assessments::{entities::Submission, requests::NewSubmission};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存提交，同一学生同一作业重复提交返回 Conflict
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            assessment_id: Set(req.assessment_id),
            student_id: Set(req.student_id),
            answers: Set(serde_json::to_string(&req.answers)?),
            submission_text: Set(req.submission_text),
            score: Set(req.score),
            correct_answers: Set(req.correct_answers),
            total_questions: Set(req.total_questions),
            feedback: Set(None),
            graded_at: Set(None),
            graded_by: Set(None),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "保存提交失败"))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_student_submission_impl(
        &self,
        student_id: i64,
        assessment_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::AssessmentId.eq(assessment_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询提交失败"))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_assessment_submissions_impl(
        &self,
        assessment_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询作业提交失败"))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_course_submissions_impl(&self, course_id: i64) -> Result<Vec<Submission>> {
        let assessment_ids = self.list_course_assessment_ids(course_id).await?;
        if assessment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Submissions::find()
            .filter(Column::AssessmentId.is_in(assessment_ids))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程提交失败"))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn list_student_course_submissions_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Submission>> {
        let assessment_ids = self.list_course_assessment_ids(course_id).await?;
        if assessment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::AssessmentId.is_in(assessment_ids)),
            )
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询学生提交失败"))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 评分（分数由服务层按满分截断）
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            score: Set(Some(score)),
            feedback: Set(feedback),
            graded_at: Set(Some(chrono::Utc::now().timestamp())),
            graded_by: Set(Some(graded_by)),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "保存评分失败"))?;

        self.get_submission_by_id_impl(id).await
    }
}
