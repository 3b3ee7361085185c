use super::SeaOrmStorage;
use crate::errors::PrepEaseError;
use crate::models::{
    assessments::requests::{CreateAssessmentRequest, NewSubmission},
    courses::{entities::Semester, requests::CreateCourseRequest},
    quizzes::{
        entities::{AttemptStatus, QuizDifficulty, QuizQuestion, QuizSource},
        requests::{NewQuiz, NewQuizAttempt},
    },
    users::{entities::UserRole, requests::CreateUserRequest},
};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::in_memory().await.unwrap()
}

async fn user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> i64 {
    storage
        .create_user_impl(CreateUserRequest {
            email: email.into(),
            password: "hash".into(),
            first_name: "Test".into(),
            last_name: email.into(),
            role,
            department: None,
            semester: None,
        })
        .await
        .unwrap()
        .id
}

async fn course(storage: &SeaOrmStorage, code: &str) -> i64 {
    storage
        .create_course_impl(CreateCourseRequest {
            course_code: code.into(),
            title: "Algorithms".into(),
            description: None,
            credits: 3,
            semester: Semester::Fall,
            year: 2025,
        })
        .await
        .unwrap()
        .id
}

fn new_quiz(course_id: i64, created_by: i64) -> NewQuiz {
    NewQuiz {
        course_id,
        material_id: None,
        created_by,
        title: "Week 1".into(),
        description: None,
        time_limit: 30,
        passing_score: 70,
        show_answers: true,
        shuffle_questions: true,
        difficulty: QuizDifficulty::Medium,
        questions: vec![QuizQuestion {
            question: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_answer: 1,
            explanation: None,
            difficulty: QuizDifficulty::Easy,
        }],
        generated_by: QuizSource::Manual,
    }
}

fn attempt(quiz_id: i64, student_id: i64, course_id: i64, score: i32) -> NewQuizAttempt {
    NewQuizAttempt {
        quiz_id,
        student_id,
        course_id,
        answers: Vec::new(),
        score,
        total_questions: 1,
        correct_answers: if score > 0 { 1 } else { 0 },
        status: if score >= 70 {
            AttemptStatus::Passed
        } else {
            AttemptStatus::Failed
        },
        time_taken: 12,
        started_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let storage = storage().await;
    let id = user(&storage, "Ada@Example.com", UserRole::Student).await;

    let found = storage
        .get_user_by_email_impl("ada@example.COM")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.email, "ada@example.com");
    assert_eq!(storage.count_users_impl().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_enrollment_is_conflict() {
    let storage = storage().await;
    let student = user(&storage, "s@example.com", UserRole::Student).await;
    let course_id = course(&storage, "CS101").await;

    storage.enroll_student_impl(student, course_id).await.unwrap();
    let err = storage
        .enroll_student_impl(student, course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, PrepEaseError::Conflict(_)));

    assert!(storage.unenroll_student_impl(student, course_id).await.unwrap());
    assert!(storage.get_enrollment_impl(student, course_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_teacher_assignment() {
    let storage = storage().await;
    let teacher = user(&storage, "t@example.com", UserRole::Teacher).await;
    let course_id = course(&storage, "CS201").await;

    storage.assign_teacher_impl(course_id, teacher).await.unwrap();
    assert!(storage.is_course_teacher_impl(course_id, teacher).await.unwrap());
    assert!(matches!(
        storage.assign_teacher_impl(course_id, teacher).await,
        Err(PrepEaseError::Conflict(_))
    ));

    let teachers = storage.list_course_teachers_impl(course_id).await.unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].id, teacher);

    assert!(storage.remove_teacher_impl(course_id, teacher).await.unwrap());
    assert!(!storage.is_course_teacher_impl(course_id, teacher).await.unwrap());
}

#[tokio::test]
async fn test_second_quiz_attempt_rejected_and_original_kept() {
    let storage = storage().await;
    let teacher = user(&storage, "t@example.com", UserRole::Teacher).await;
    let student = user(&storage, "s@example.com", UserRole::Student).await;
    let course_id = course(&storage, "CS301").await;
    let quiz = storage.create_quiz_impl(new_quiz(course_id, teacher)).await.unwrap();
    assert_eq!(quiz.question_count, 1);

    let first = storage
        .create_quiz_attempt_impl(attempt(quiz.id, student, course_id, 100))
        .await
        .unwrap();
    let err = storage
        .create_quiz_attempt_impl(attempt(quiz.id, student, course_id, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, PrepEaseError::Conflict(_)));

    let kept = storage
        .get_student_quiz_attempt_impl(quiz.id, student)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.id, first.id);
    assert_eq!(kept.score, 100);
    assert_eq!(kept.status, AttemptStatus::Passed);
}

#[tokio::test]
async fn test_soft_deleted_quiz_hidden_from_course_list() {
    let storage = storage().await;
    let teacher = user(&storage, "t@example.com", UserRole::Teacher).await;
    let course_id = course(&storage, "CS401").await;
    let quiz = storage.create_quiz_impl(new_quiz(course_id, teacher)).await.unwrap();

    assert!(storage.deactivate_quiz_impl(quiz.id).await.unwrap());
    assert!(storage.list_course_quizzes_impl(course_id).await.unwrap().is_empty());

    let stored = storage.get_quiz_by_id_impl(quiz.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_submission_unique_and_grading() {
    let storage = storage().await;
    let teacher = user(&storage, "t@example.com", UserRole::Teacher).await;
    let student = user(&storage, "s@example.com", UserRole::Student).await;
    let course_id = course(&storage, "CS501").await;
    let assessment = storage
        .create_assessment_impl(CreateAssessmentRequest {
            course_id,
            title: "Essay".into(),
            description: None,
            due_date: None,
            total_marks: None,
            questions: Vec::new(),
        })
        .await
        .unwrap();
    assert_eq!(assessment.total_marks, 100.0);

    let new_submission = NewSubmission {
        assessment_id: assessment.id,
        student_id: student,
        answers: Vec::new(),
        submission_text: Some("my essay".into()),
        score: None,
        correct_answers: 0,
        total_questions: 0,
    };
    let submission = storage
        .create_submission_impl(new_submission.clone())
        .await
        .unwrap();
    assert!(matches!(
        storage.create_submission_impl(new_submission).await,
        Err(PrepEaseError::Conflict(_))
    ));

    let graded = storage
        .grade_submission_impl(submission.id, 88.0, Some("good".into()), teacher)
        .await
        .unwrap()
        .unwrap();
    assert!(graded.is_graded());
    assert_eq!(graded.score, Some(88.0));
    assert_eq!(graded.graded_by, Some(teacher));

    let course_submissions = storage.list_course_submissions_impl(course_id).await.unwrap();
    assert_eq!(course_submissions.len(), 1);
    let other_course = course(&storage, "CS502").await;
    assert!(
        storage
            .list_student_course_submissions_impl(student, other_course)
            .await
            .unwrap()
            .is_empty()
    );
}
