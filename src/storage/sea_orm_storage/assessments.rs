//! 作业存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::errors::Result;
use crate::models::assessments::{
    entities::{Assessment, AssessmentKind},
    requests::{CreateAssessmentRequest, UpdateAssessmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_assessment_impl(&self, req: CreateAssessmentRequest) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            total_marks: Set(req.total_marks.unwrap_or(100.0)),
            questions: Set(serde_json::to_string(&req.questions)?),
            kind: Set(AssessmentKind::Manual.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "创建作业失败"))?;

        Ok(result.into_assessment())
    }

    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询作业失败"))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 课程作业，按截止时间排序
    pub async fn list_course_assessments_impl(&self, course_id: i64) -> Result<Vec<Assessment>> {
        let result = Assessments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程作业失败"))?;

        Ok(result.into_iter().map(|m| m.into_assessment()).collect())
    }

    pub async fn update_assessment_impl(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        if self.get_assessment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }
        if let Some(total_marks) = update.total_marks {
            model.total_marks = Set(total_marks);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "更新作业失败"))?;

        self.get_assessment_by_id_impl(id).await
    }

    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "删除作业失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub(super) async fn list_course_assessment_ids(&self, course_id: i64) -> Result<Vec<i64>> {
        Assessments::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程作业失败"))
    }
}
