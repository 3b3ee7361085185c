use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{CreateQuizRequest, GenerateQuizRequest, SubmitQuizRequest};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::{SafeCourseIdI64, SafeIDI64, SafeMaterialIdI64};

// 懒加载的全局 QuizService 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn create_quiz(
    req: HttpRequest,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(body.into_inner(), &req).await
}

pub async fn generate_quiz(
    req: HttpRequest,
    body: web::Json<GenerateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.generate_quiz(body.into_inner(), &req).await
}

pub async fn list_material_quizzes(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .list_material_quizzes(material_id.0, &req)
        .await
}

pub async fn list_course_quizzes(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_course_quizzes(course_id.0, &req).await
}

pub async fn course_attempts_summary(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .course_attempts_summary(course_id.0, &req)
        .await
}

pub async fn get_quiz(req: HttpRequest, quiz_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(quiz_id.0, &req).await
}

pub async fn submit_attempt(
    req: HttpRequest,
    quiz_id: SafeIDI64,
    body: web::Json<SubmitQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_attempt(quiz_id.0, body.into_inner(), &req)
        .await
}

pub async fn list_attempts(req: HttpRequest, quiz_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(quiz_id.0, &req).await
}

pub async fn delete_quiz(req: HttpRequest, quiz_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(quiz_id.0, &req).await
}

// 配置路由
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    let teacher_only = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .wrap(teacher_only())
                    .route(web::post().to(create_quiz)),
            )
            .service(
                web::resource("/generate")
                    .wrap(teacher_only())
                    .wrap(middlewares::RateLimit::ai_request())
                    .route(web::post().to(generate_quiz)),
            )
            .route(
                "/material/{material_id}",
                web::get().to(list_material_quizzes),
            )
            .route("/course/{course_id}", web::get().to(list_course_quizzes))
            .service(
                web::resource("/course/{course_id}/attempts-summary")
                    .wrap(teacher_only())
                    .route(web::get().to(course_attempts_summary)),
            )
            .route("/{id}", web::get().to(get_quiz))
            .route("/{id}", web::delete().to(delete_quiz))
            .route("/{id}/submit", web::post().to(submit_attempt))
            .route("/{id}/attempts", web::get().to(list_attempts)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::models::courses::{entities::Semester, requests::CreateCourseRequest};
    use crate::models::quizzes::{
        entities::{AttemptStatus, QuizDifficulty, QuizQuestion, QuizSource},
        requests::NewQuiz,
    };
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::jwt::JwtUtils;

    async fn seed_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> (i64, String) {
        let user = storage
            .create_user(CreateUserRequest {
                email: email.into(),
                password: "hash".into(),
                first_name: "Test".into(),
                last_name: "User".into(),
                role,
                department: None,
                semester: None,
            })
            .await
            .unwrap();
        let token = JwtUtils::generate_access_token(user.id, role.as_str()).unwrap();
        (user.id, token)
    }

    fn question(text: &str, correct: i32) -> QuizQuestion {
        QuizQuestion {
            question: text.into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
            explanation: None,
            difficulty: QuizDifficulty::Medium,
        }
    }

    #[actix_web::test]
    async fn test_second_attempt_is_rejected() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let (teacher_id, _) = seed_user(&storage, "t@example.com", UserRole::Teacher).await;
        let (student_id, student_token) =
            seed_user(&storage, "s@example.com", UserRole::Student).await;
        let (_, outsider_token) = seed_user(&storage, "o@example.com", UserRole::Student).await;

        let course = storage
            .create_course(CreateCourseRequest {
                course_code: "CS201".into(),
                title: "Data Structures".into(),
                description: None,
                credits: 3,
                semester: Semester::Spring,
                year: 2026,
            })
            .await
            .unwrap();
        storage.assign_teacher(course.id, teacher_id).await.unwrap();
        storage.enroll_student(student_id, course.id).await.unwrap();

        let quiz = storage
            .create_quiz(NewQuiz {
                course_id: course.id,
                material_id: None,
                created_by: teacher_id,
                title: "Trees".into(),
                description: None,
                time_limit: 30,
                passing_score: 70,
                show_answers: true,
                shuffle_questions: false,
                difficulty: QuizDifficulty::Medium,
                questions: vec![question("Root?", 1), question("Leaf?", 0)],
                generated_by: QuizSource::Manual,
            })
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_quiz_routes),
        )
        .await;

        let submit = |token: &str| {
            test::TestRequest::post()
                .uri(&format!("/api/v1/quizzes/{}/submit", quiz.id))
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "answers": [{"selected_answer": 1}, {"selected_answer": 2}],
                    "time_taken": 120
                }))
                .to_request()
        };

        let resp = test::call_service(&app, submit(&student_token)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["attempt"]["score"], 50);
        assert_eq!(body["data"]["attempt"]["status"], "failed");
        let attempt_id = body["data"]["attempt"]["id"].as_i64().unwrap();

        let resp = test::call_service(&app, submit(&student_token)).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4101);

        let resp = test::call_service(&app, submit(&outsider_token)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let attempts = storage.list_quiz_attempts(quiz.id, None).await.unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].id, attempt_id);
        assert_eq!(attempts[0].score, 50);
        assert_eq!(attempts[0].status, AttemptStatus::Failed);
    }

    #[actix_web::test]
    async fn test_requests_without_token_are_unauthorized() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_quiz_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/quizzes/course/1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
