//! 课程资料存储操作

use super::{SeaOrmStorage, read_error, write_error};
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::Result;
use crate::models::materials::{
    entities::{AiStatus, Material, MaterialStatus},
    requests::{MaterialStateUpdate, NewMaterial},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_material_impl(&self, req: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            uploaded_by: Set(req.uploaded_by),
            title: Set(req.title),
            file_name: Set(req.file_name),
            stored_name: Set(req.stored_name),
            file_type: Set(req.file_type.to_string()),
            status: Set(MaterialStatus::Processing.to_string()),
            ai_status: Set(AiStatus::Pending.to_string()),
            text_content: Set(None),
            chunk_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "保存资料失败"))?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| read_error(e, "查询资料失败"))?;

        Ok(result.map(|m| m.into_material()))
    }

    pub async fn list_course_materials_impl(&self, course_id: i64) -> Result<Vec<Material>> {
        let result = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| read_error(e, "查询课程资料失败"))?;

        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新处理状态，返回记录是否仍然存在
    pub async fn update_material_state_impl(
        &self,
        id: i64,
        update: MaterialStateUpdate,
    ) -> Result<bool> {
        if self.get_material_by_id_impl(id).await?.is_none() {
            return Ok(false);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(ai_status) = update.ai_status {
            model.ai_status = Set(ai_status.to_string());
        }
        if let Some(text_content) = update.text_content {
            model.text_content = Set(Some(text_content));
        }
        if let Some(chunk_count) = update.chunk_count {
            model.chunk_count = Set(chunk_count);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "更新资料状态失败"))?;

        Ok(true)
    }

    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "删除资料失败"))?;

        Ok(result.rows_affected > 0)
    }
}
