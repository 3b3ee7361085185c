use rust_prepease::grading::performance::build_summary;
use rust_prepease::grading::score_quiz;
use rust_prepease::models::quizzes::entities::{AttemptStatus, QuizDifficulty, QuizQuestion};
use rust_prepease::models::quizzes::requests::SubmittedAnswer;

fn questions(correct: &[i32]) -> Vec<QuizQuestion> {
    correct
        .iter()
        .enumerate()
        .map(|(i, &answer)| QuizQuestion {
            question: format!("Question {}", i + 1),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: answer,
            explanation: None,
            difficulty: QuizDifficulty::Medium,
        })
        .collect()
}

fn answers(selected: &[Option<i32>]) -> Vec<SubmittedAnswer> {
    selected
        .iter()
        .map(|&selected_answer| SubmittedAnswer {
            selected_answer,
            time_spent: Some(20),
        })
        .collect()
}

#[test]
fn course_with_assignments_blends_completion_and_quizzes() {
    // 4 份作业：2 份已评分（80、90），1 份已提交未评分，1 份未提交
    let summary = build_summary(4, 3, &[80.0, 90.0], &[70.0, 90.0]);

    assert_eq!(summary.assignment_completion, 75);
    assert_eq!(summary.average_assignment_score, 85);
    assert_eq!(summary.average_quiz_score, 80);
    assert_eq!(summary.performance_score, 78);
    assert_eq!(summary.quiz_attempts, 2);
}

#[test]
fn course_without_assignments_uses_quiz_average() {
    let summary = build_summary(0, 0, &[], &[60.0, 80.0]);

    assert_eq!(summary.assignment_completion, 0);
    assert_eq!(summary.performance_score, 70);
}

#[test]
fn assignment_score_does_not_move_performance() {
    let low = build_summary(2, 2, &[10.0, 20.0], &[50.0]);
    let high = build_summary(2, 2, &[95.0, 100.0], &[50.0]);

    assert_ne!(low.average_assignment_score, high.average_assignment_score);
    assert_eq!(low.performance_score, high.performance_score);
}

#[test]
fn three_of_five_fails_at_default_passing_score() {
    let quiz = questions(&[1, 0, 2, 3, 1]);
    let sheet = answers(&[Some(1), Some(2), Some(2), Some(3), Some(0)]);

    let result = score_quiz(&quiz, &sheet, 70);
    assert_eq!(result.correct_answers, 3);
    assert_eq!(result.total_questions, 5);
    assert_eq!(result.score, 60);
    assert_eq!(result.status, AttemptStatus::Failed);
}

#[test]
fn unanswered_and_extra_answers_count_as_wrong() {
    let quiz = questions(&[0, 1]);
    let sheet = answers(&[None, Some(1), Some(0)]);

    let result = score_quiz(&quiz, &sheet, 50);
    assert_eq!(result.answers.len(), 3);
    assert!(!result.answers[2].is_correct);
    assert_eq!(result.score, 50);
    assert_eq!(result.status, AttemptStatus::Passed);
}
