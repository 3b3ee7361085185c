//! AI 服务 HTTP 客户端

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::types::{
    AiServiceError, EmbedPayload, ErrorBody, GenerateQuizPayload, GenerateQuizResult,
    GeneratedQuestion, HealthResult, IngestPayload, ProcessMaterialPayload, ProcessMaterialResult,
    StudyBuddyAnswer, StudyBuddyPayload,
};
use crate::config::{AiConfig, AiTimeoutConfig};
use crate::models::quizzes::entities::QuizDifficulty;

/// 共享的 AI 服务客户端，每个接口使用独立超时
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
    timeouts: AiTimeoutConfig,
}

impl AiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiServiceError> {
        let client = Client::builder()
            .user_agent(concat!("rust-prepease/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = normalize_base_url(&config.base_url).map_err(AiServiceError::InvalidUrl)?;
        debug!(url = %base_url, "Initialized AI service client");

        Ok(Self {
            client,
            base_url,
            timeouts: config.timeouts.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 由 AI 服务抽取 PDF/Word 文本
    pub async fn process_material(&self, file_path: &str) -> Result<String, AiServiceError> {
        let response = self
            .request(Method::POST, "process-material", self.timeouts.ingest)
            .json(&ProcessMaterialPayload { file_path })
            .send()
            .await
            .map_err(classify_send_error)?;

        let result: ProcessMaterialResult = parse_json(response).await?;
        result.extracted_text.ok_or(AiServiceError::EmptyResponse)
    }

    pub async fn ingest(&self, material_id: i64, extracted_text: &str) -> Result<(), AiServiceError> {
        let response = self
            .request(Method::POST, "ingest", self.timeouts.ingest)
            .json(&IngestPayload {
                material_id: material_id.to_string(),
                extracted_text,
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        ensure_success(response).await?;
        debug!(material_id, "Material ingested");
        Ok(())
    }

    pub async fn embed(&self, lecture_id: i64, chunks: &[String]) -> Result<(), AiServiceError> {
        let response = self
            .request(Method::POST, "embed", self.timeouts.embed)
            .json(&EmbedPayload {
                lecture_id: lecture_id.to_string(),
                chunks,
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        ensure_success(response).await?;
        debug!(lecture_id, chunks = chunks.len(), "Lecture embedded");
        Ok(())
    }

    pub async fn study_buddy(
        &self,
        question: &str,
        lecture_id: i64,
    ) -> Result<StudyBuddyAnswer, AiServiceError> {
        let response = self
            .request(Method::POST, "study-buddy", self.timeouts.chat)
            .json(&StudyBuddyPayload {
                question,
                lecture_id: lecture_id.to_string(),
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        parse_json(response).await
    }

    pub async fn generate_quiz(
        &self,
        material_id: i64,
        difficulty: QuizDifficulty,
        question_count: i32,
    ) -> Result<Vec<GeneratedQuestion>, AiServiceError> {
        let response = self
            .request(Method::POST, "generate-quiz", self.timeouts.quiz)
            .json(&GenerateQuizPayload {
                material_id: material_id.to_string(),
                difficulty: difficulty.as_str(),
                question_count,
            })
            .send()
            .await
            .map_err(classify_send_error)?;

        let result: GenerateQuizResult = parse_json(response).await?;
        Ok(result.questions)
    }

    /// 删除资料对应的向量数据
    pub async fn delete_lecture(&self, lecture_id: i64) -> Result<(), AiServiceError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("lecture/{lecture_id}"),
                self.timeouts.health,
            )
            .send()
            .await
            .map_err(classify_send_error)?;

        ensure_success(response).await
    }

    /// `status == "healthy"` 视为健康，任何错误都视为不健康
    pub async fn health(&self) -> bool {
        let response = match self
            .request(Method::GET, "health", self.timeouts.health)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("AI health check failed: {e}");
                return false;
            }
        };

        match parse_json::<HealthResult>(response).await {
            Ok(result) => result.status == "healthy",
            Err(e) => {
                warn!("AI health check failed: {e}");
                false
            }
        }
    }

    fn request(&self, method: Method, path: &str, timeout_secs: u64) -> RequestBuilder {
        self.client
            .request(method, format_endpoint(&self.base_url, path))
            .timeout(Duration::from_secs(timeout_secs))
    }
}

fn classify_send_error(e: reqwest::Error) -> AiServiceError {
    if e.is_connect() {
        AiServiceError::Unavailable(e.to_string())
    } else {
        AiServiceError::Http(e)
    }
}

async fn ensure_success(response: Response) -> Result<(), AiServiceError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(status_error(response).await)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AiServiceError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

async fn status_error(response: Response) -> AiServiceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    // FastAPI 错误体为 {"detail": "..."}
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.detail)
        .unwrap_or(body);

    let error = if status == StatusCode::NOT_FOUND {
        AiServiceError::NotFound(detail)
    } else {
        AiServiceError::UnexpectedStatus {
            status,
            body: detail,
        }
    };
    error!(error = %error, "AI service request failed");
    error
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

fn format_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{DELETE, GET, POST},
        MockServer,
    };
    use serde_json::json;

    fn client_for(base_url: &str) -> AiClient {
        AiClient::new(&AiConfig {
            base_url: base_url.to_string(),
            timeouts: AiTimeoutConfig {
                ingest: 5,
                embed: 5,
                chat: 5,
                quiz: 5,
                health: 2,
            },
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_formatting() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000/"
        );
        assert_eq!(
            format_endpoint("http://localhost:8000/", "/embed"),
            "http://localhost:8000/embed"
        );
        assert!(normalize_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_ingest_sends_camel_case_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ingest")
                    .json_body(json!({"materialId": "7", "extractedText": "hello"}));
                then.status(200).json_body(json!({"status": "stored"}));
            })
            .await;

        client_for(&server.base_url()).ingest(7, "hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_sends_chunks() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/embed")
                    .json_body(json!({"lectureId": "3", "chunks": ["a b", "b c"]}));
                then.status(200).json_body(json!({"status": "success"}));
            })
            .await;

        let chunks = vec!["a b".to_string(), "b c".to_string()];
        client_for(&server.base_url()).embed(3, &chunks).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_study_buddy_answer() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/study-buddy")
                    .json_body(json!({"question": "What is a heap?", "lectureId": "12"}));
                then.status(200).json_body(json!({
                    "answer": "A tree-shaped priority queue.",
                    "confidence": "high",
                    "sources_used": 3
                }));
            })
            .await;

        let answer = client_for(&server.base_url())
            .study_buddy("What is a heap?", 12)
            .await
            .unwrap();
        assert_eq!(answer.answer, "A tree-shaped priority queue.");
        assert_eq!(answer.confidence.as_deref(), Some("high"));
        assert_eq!(answer.sources_used, Some(3));
    }

    #[tokio::test]
    async fn test_generate_quiz_parses_questions() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate-quiz").json_body(json!({
                    "materialId": "5",
                    "difficulty": "hard",
                    "questionCount": 2
                }));
                then.status(200).json_body(json!({
                    "questions": [
                        {"question": "Q1", "options": ["a", "b"], "correctAnswer": 1},
                        {"question": "Q2", "options": ["c", "d"], "correctAnswer": 0, "explanation": "why"}
                    ]
                }));
            })
            .await;

        let questions = client_for(&server.base_url())
            .generate_quiz(5, QuizDifficulty::Hard, 2)
            .await
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, 1);
        assert_eq!(questions[1].explanation.as_deref(), Some("why"));

        let converted = questions[0].clone().into_quiz_question(QuizDifficulty::Hard);
        assert_eq!(converted.difficulty, QuizDifficulty::Hard);
        assert_eq!(converted.options, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/study-buddy");
                then.status(404)
                    .json_body(json!({"detail": "Lecture not found"}));
            })
            .await;

        let err = client_for(&server.base_url())
            .study_buddy("q", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AiServiceError::NotFound(ref d) if d == "Lecture not found"));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_502() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/generate-quiz");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server.base_url())
            .generate_quiz(1, QuizDifficulty::Medium, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AiServiceError::UnexpectedStatus { ref body, .. } if body == "boom"));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_503() {
        let err = client_for("http://127.0.0.1:1")
            .ingest(1, "text")
            .await
            .unwrap_err();
        assert!(matches!(err, AiServiceError::Unavailable(_)));
        assert_eq!(
            err.status_code(),
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/health");
                then.status(200).json_body(json!({"status": "healthy"}));
            })
            .await;
        assert!(client_for(&server.base_url()).health().await);
        assert!(!client_for("http://127.0.0.1:1").health().await);
    }

    #[tokio::test]
    async fn test_delete_lecture() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/lecture/9");
                then.status(200).json_body(json!({"status": "deleted"}));
            })
            .await;

        client_for(&server.base_url()).delete_lecture(9).await.unwrap();
        mock.assert_async().await;
    }
}
