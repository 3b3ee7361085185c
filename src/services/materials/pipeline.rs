//! 资料后台处理流程
//!
//! 上传成功后异步执行：抽取文本 → 写入数据库 → 送入 AI 服务 → 分块向量化。
//! 任何一步失败都只记录在资料的状态字段中，不影响上传请求本身。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::ai::AiClient;
use crate::errors::{PrepEaseError, Result};
use crate::models::materials::entities::{AiStatus, Material, MaterialStatus};
use crate::models::materials::requests::MaterialStateUpdate;
use crate::storage::Storage;
use crate::utils::chunker::ChunkerConfig;

/// 一次处理的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// 已完成向量化
    Processed { chunk_count: i32 },
    /// 文本抽取失败或为空，资料不可用
    ExtractionFailed,
    /// 文本已保存，AI 侧处理失败，可重试
    AiPending,
}

#[derive(Clone)]
pub struct MaterialPipeline {
    storage: Arc<dyn Storage>,
    ai: AiClient,
    chunker: ChunkerConfig,
    upload_dir: PathBuf,
}

impl MaterialPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        ai: AiClient,
        chunker: ChunkerConfig,
        upload_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage,
            ai,
            chunker,
            upload_dir: upload_dir.into(),
        }
    }

    /// 标记为处理中并在后台执行
    pub async fn start(&self, material: Material) -> Result<()> {
        self.set_state(
            material.id,
            MaterialStateUpdate {
                status: Some(MaterialStatus::Processing),
                ..Default::default()
            },
        )
        .await?;

        let pipeline = self.clone();
        tokio::spawn(async move {
            let material_id = material.id;
            match pipeline.process(material).await {
                Ok(outcome) => info!(material_id, ?outcome, "Material pipeline finished"),
                Err(e) => error!(material_id, "Material pipeline aborted: {e}"),
            }
        });
        Ok(())
    }

    /// 执行处理流程，中途出错时把资料复位为可重新处理的状态
    pub async fn process(&self, material: Material) -> Result<PipelineOutcome> {
        let material_id = material.id;
        let result = self.run(material).await;
        if result.is_err() {
            self.reset_after_abort(material_id).await;
        }
        result
    }

    async fn reset_after_abort(&self, material_id: i64) {
        let update = MaterialStateUpdate {
            status: Some(MaterialStatus::Pending),
            ai_status: Some(AiStatus::Failed),
            ..Default::default()
        };
        if let Err(e) = self.storage.update_material_state(material_id, update).await {
            error!(material_id, "Failed to reset aborted material: {e}");
        }
    }

    pub async fn run(&self, material: Material) -> Result<PipelineOutcome> {
        let text = match self.extract_text(&material).await {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!(material.id, "No text could be extracted from material");
                self.set_state(
                    material.id,
                    MaterialStateUpdate {
                        status: Some(MaterialStatus::Pending),
                        ai_status: Some(AiStatus::Failed),
                        ..Default::default()
                    },
                )
                .await?;
                return Ok(PipelineOutcome::ExtractionFailed);
            }
        };

        self.set_state(
            material.id,
            MaterialStateUpdate {
                status: Some(MaterialStatus::Ready),
                text_content: Some(text.clone()),
                ..Default::default()
            },
        )
        .await?;

        match self.index(material.id, &text).await {
            Ok(chunk_count) => {
                self.set_state(
                    material.id,
                    MaterialStateUpdate {
                        ai_status: Some(AiStatus::Processed),
                        chunk_count: Some(chunk_count),
                        ..Default::default()
                    },
                )
                .await?;
                Ok(PipelineOutcome::Processed { chunk_count })
            }
            Err(e) => {
                warn!(material.id, "AI indexing failed, material left pending: {e}");
                self.set_state(
                    material.id,
                    MaterialStateUpdate {
                        ai_status: Some(AiStatus::Pending),
                        ..Default::default()
                    },
                )
                .await?;
                Ok(PipelineOutcome::AiPending)
            }
        }
    }

    /// 已保存过文本（重新处理）时直接复用
    async fn extract_text(&self, material: &Material) -> Option<String> {
        if let Some(text) = material.text_content.as_ref().filter(|t| !t.trim().is_empty()) {
            return Some(text.clone());
        }

        let path = self.upload_dir.join(&material.stored_name);
        if material.file_type.is_plain_text() {
            return match read_utf8(&path).await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(material.id, "Failed to read text material: {e}");
                    None
                }
            };
        }

        let file_path = std::path::absolute(&path).unwrap_or(path);
        match self
            .ai
            .process_material(&file_path.to_string_lossy())
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(material.id, "Text extraction by AI service failed: {e}");
                None
            }
        }
    }

    async fn index(&self, material_id: i64, text: &str) -> Result<i32> {
        self.ai
            .ingest(material_id, text)
            .await
            .map_err(|e| PrepEaseError::external_service(e.to_string()))?;

        let chunks = self.chunker.split(text)?;
        if chunks.is_empty() {
            return Err(PrepEaseError::external_service("nothing to embed"));
        }

        self.ai
            .embed(material_id, &chunks)
            .await
            .map_err(|e| PrepEaseError::external_service(e.to_string()))?;

        Ok(chunks.len() as i32)
    }

    async fn set_state(&self, material_id: i64, update: MaterialStateUpdate) -> Result<()> {
        if !self.storage.update_material_state(material_id, update).await? {
            warn!(material_id, "Material disappeared during processing");
        }
        Ok(())
    }
}

async fn read_utf8(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8(bytes)
        .map_err(|e| PrepEaseError::file_operation(format!("material is not valid UTF-8: {e}")))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AiConfig, AiTimeoutConfig};
    use crate::models::courses::{entities::Semester, requests::CreateCourseRequest};
    use crate::models::materials::entities::MaterialFileType;
    use crate::models::materials::requests::NewMaterial;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    struct Fixture {
        storage: Arc<dyn Storage>,
        db: sea_orm::DatabaseConnection,
        upload_dir: PathBuf,
    }

    impl Fixture {
        async fn new() -> Self {
            let sea_orm_storage = SeaOrmStorage::in_memory().await.unwrap();
            let db = sea_orm_storage.db.clone();
            let storage: Arc<dyn Storage> = Arc::new(sea_orm_storage);
            let upload_dir = std::env::temp_dir().join(format!("prepease-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&upload_dir).unwrap();
            Self {
                storage,
                db,
                upload_dir,
            }
        }

        async fn material(&self, file_type: MaterialFileType, content: &[u8]) -> Material {
            let teacher = self
                .storage
                .create_user(CreateUserRequest {
                    email: "teacher@example.com".into(),
                    password: "hash".into(),
                    first_name: "Ada".into(),
                    last_name: "Lovelace".into(),
                    role: UserRole::Teacher,
                    department: None,
                    semester: None,
                })
                .await
                .unwrap();
            let course = self
                .storage
                .create_course(CreateCourseRequest {
                    course_code: "CS101".into(),
                    title: "Systems".into(),
                    description: None,
                    credits: 3,
                    semester: Semester::Fall,
                    year: 2025,
                })
                .await
                .unwrap();

            let stored_name = format!("{}{}", uuid::Uuid::new_v4(), file_type.extension());
            std::fs::write(self.upload_dir.join(&stored_name), content).unwrap();

            self.storage
                .create_material(NewMaterial {
                    course_id: course.id,
                    uploaded_by: teacher.id,
                    title: "Lecture 1".into(),
                    file_name: format!("lecture{}", file_type.extension()),
                    stored_name,
                    file_type,
                })
                .await
                .unwrap()
        }

        fn pipeline(&self, server: &MockServer) -> MaterialPipeline {
            let ai = AiClient::new(&AiConfig {
                base_url: server.base_url(),
                timeouts: AiTimeoutConfig {
                    ingest: 5,
                    embed: 5,
                    chat: 5,
                    quiz: 5,
                    health: 2,
                },
            })
            .unwrap();
            MaterialPipeline::new(
                self.storage.clone(),
                ai,
                ChunkerConfig::new(4, 1).unwrap(),
                &self.upload_dir,
            )
        }

        async fn reload(&self, id: i64) -> Material {
            self.storage.get_material_by_id(id).await.unwrap().unwrap()
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.upload_dir);
        }
    }

    #[tokio::test]
    async fn test_text_material_is_processed() {
        let server = MockServer::start_async().await;
        let ingest = server
            .mock_async(|when, then| {
                when.method(POST).path("/ingest");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        let embed = server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;

        let fixture = Fixture::new().await;
        let material = fixture
            .material(MaterialFileType::Txt, b"one two three four\n\nfive six seven")
            .await;

        let outcome = fixture.pipeline(&server).run(material.clone()).await.unwrap();
        // 7 个词，窗口 4、步长 3：[0,4) [3,7)
        assert_eq!(outcome, PipelineOutcome::Processed { chunk_count: 2 });
        ingest.assert_async().await;
        embed.assert_async().await;

        let stored = fixture.reload(material.id).await;
        assert_eq!(stored.status, MaterialStatus::Ready);
        assert_eq!(stored.ai_status, AiStatus::Processed);
        assert_eq!(stored.chunk_count, 2);
        assert_eq!(
            stored.text_content.as_deref(),
            Some("one two three four\n\nfive six seven")
        );
    }

    #[tokio::test]
    async fn test_embed_failure_leaves_material_pending() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ingest");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(500).json_body(json!({"detail": "vector store down"}));
            })
            .await;

        let fixture = Fixture::new().await;
        let material = fixture.material(MaterialFileType::Markdown, b"# Notes\nownership").await;

        let outcome = fixture.pipeline(&server).run(material.clone()).await.unwrap();
        assert_eq!(outcome, PipelineOutcome::AiPending);

        let stored = fixture.reload(material.id).await;
        assert_eq!(stored.status, MaterialStatus::Ready);
        assert_eq!(stored.ai_status, AiStatus::Pending);
        assert_eq!(stored.chunk_count, 0);
    }

    #[tokio::test]
    async fn test_pdf_extraction_goes_through_ai_service() {
        let server = MockServer::start_async().await;
        let extract = server
            .mock_async(|when, then| {
                when.method(POST).path("/process-material");
                then.status(200)
                    .json_body(json!({"extractedText": "borrow checker rules"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ingest");
                then.status(200).json_body(json!({}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(200).json_body(json!({}));
            })
            .await;

        let fixture = Fixture::new().await;
        let material = fixture.material(MaterialFileType::Pdf, b"%PDF-1.7\n").await;

        let outcome = fixture.pipeline(&server).run(material.clone()).await.unwrap();
        assert_eq!(outcome, PipelineOutcome::Processed { chunk_count: 1 });
        extract.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_extraction_marks_failed() {
        let server = MockServer::start_async().await;
        let ingest = server
            .mock_async(|when, then| {
                when.method(POST).path("/ingest");
                then.status(200).json_body(json!({}));
            })
            .await;

        let fixture = Fixture::new().await;
        let material = fixture.material(MaterialFileType::Txt, b"   \n\n  ").await;

        let outcome = fixture.pipeline(&server).run(material.clone()).await.unwrap();
        assert_eq!(outcome, PipelineOutcome::ExtractionFailed);
        assert_eq!(ingest.hits_async().await, 0);

        let stored = fixture.reload(material.id).await;
        assert_eq!(stored.status, MaterialStatus::Pending);
        assert_eq!(stored.ai_status, AiStatus::Failed);
    }

    #[tokio::test]
    async fn test_aborted_run_resets_material_for_retry() {
        use sea_orm::ConnectionTrait;

        let server = MockServer::start_async().await;
        let fixture = Fixture::new().await;
        let material = fixture
            .material(MaterialFileType::Txt, b"lifetimes and borrowing")
            .await;

        // 写入 ready 状态时数据库报错
        fixture
            .db
            .execute_unprepared(
                "CREATE TRIGGER reject_ready BEFORE UPDATE OF status ON materials \
                 WHEN NEW.status = 'ready' BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .await
            .unwrap();

        let result = fixture.pipeline(&server).process(material.clone()).await;
        assert!(result.is_err());

        let stored = fixture.reload(material.id).await;
        assert_eq!(stored.status, MaterialStatus::Pending);
        assert_eq!(stored.ai_status, AiStatus::Failed);
    }
}
