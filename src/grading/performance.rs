//! 学生表现汇总
//!
//! 根据作业提交与测验作答记录计算完成率、平均分和综合表现分。
//! 所有函数均为纯函数，不访问存储层。

use std::collections::HashMap;

use crate::models::assessments::entities::{Assessment, Submission};
use crate::models::performance::{
    AssignmentProgress, AssignmentStatus, AttemptView, PerformanceSummary, QuizAttemptSummary,
    QuizProgress, StudentCourseReport,
};
use crate::models::quizzes::entities::{Quiz, QuizAttempt};

/// 四舍五入（远离零）到整数
pub fn round_score(value: f64) -> i64 {
    value.round() as i64
}

/// 平均值，空集合返回 0
fn mean_rounded<I>(values: I) -> i64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0
    } else {
        round_score(sum / count as f64)
    }
}

/// 百分比，分母为 0 时返回 0
pub fn percentage(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    round_score(100.0 * part as f64 / total as f64)
}

/// 选出最近完成的一次作答，完成时间相同时取 id 较大者
pub fn latest_attempt<'a, I>(attempts: I) -> Option<&'a QuizAttempt>
where
    I: IntoIterator<Item = &'a QuizAttempt>,
{
    attempts.into_iter().max_by(|a, b| {
        a.completed_at
            .cmp(&b.completed_at)
            .then_with(|| a.id.cmp(&b.id))
    })
}

/// 由各项计数计算综合表现
///
/// 有作业时综合分为完成率与测验均分的平均，否则等于测验均分。
/// 作业得分只做展示，不参与综合分。
pub fn build_summary(
    assignment_total: i64,
    assignment_submitted: i64,
    graded_scores: &[f64],
    quiz_scores: &[f64],
) -> PerformanceSummary {
    let assignment_completion = percentage(assignment_submitted, assignment_total);
    let average_assignment_score = mean_rounded(graded_scores.iter().copied());
    let average_quiz_score = mean_rounded(quiz_scores.iter().copied());

    let performance_score = if assignment_total > 0 {
        round_score((assignment_completion + average_quiz_score) as f64 / 2.0)
    } else {
        average_quiz_score
    };

    PerformanceSummary {
        assignment_total,
        assignment_submitted,
        assignment_completion,
        average_assignment_score,
        quiz_attempts: quiz_scores.len() as i64,
        average_quiz_score,
        performance_score,
    }
}

fn assignment_status(submission: Option<&Submission>) -> AssignmentStatus {
    match submission {
        Some(s) if s.is_graded() => AssignmentStatus::Graded,
        Some(_) => AssignmentStatus::Submitted,
        None => AssignmentStatus::Pending,
    }
}

fn graded_score(submission: &Submission) -> Option<f64> {
    if submission.is_graded() {
        submission.score
    } else {
        None
    }
}

/// 计算单个学生在一门课程中的表现汇总
///
/// `submissions` 与 `attempts` 应已限定为该学生，不属于 `assessments` 的提交会被忽略。
pub fn summarize_student(
    assessments: &[Assessment],
    submissions: &[Submission],
    attempts: &[QuizAttempt],
) -> PerformanceSummary {
    let by_assessment: HashMap<i64, &Submission> = submissions
        .iter()
        .map(|s| (s.assessment_id, s))
        .collect();

    let mut submitted = 0_i64;
    let mut graded_scores = Vec::new();
    for assessment in assessments {
        if let Some(submission) = by_assessment.get(&assessment.id) {
            submitted += 1;
            if let Some(score) = graded_score(submission) {
                graded_scores.push(score);
            }
        }
    }

    let quiz_scores: Vec<f64> = attempts.iter().map(|a| f64::from(a.score)).collect();

    build_summary(
        assessments.len() as i64,
        submitted,
        &graded_scores,
        &quiz_scores,
    )
}

fn attempt_view(attempt: &QuizAttempt) -> AttemptView {
    AttemptView {
        attempt_id: attempt.id,
        score: attempt.score,
        status: attempt.status,
        correct_answers: attempt.correct_answers,
        total_questions: attempt.total_questions,
        time_taken: attempt.time_taken,
        completed_at: attempt.completed_at,
    }
}

/// 构建学生课程详情：逐项作业状态、逐个测验的作答历史与汇总
///
/// 只统计 `quizzes` 目录中测验的作答记录。
pub fn build_student_report(
    assessments: &[Assessment],
    submissions: &[Submission],
    quizzes: &[Quiz],
    attempts: &[QuizAttempt],
) -> StudentCourseReport {
    let by_assessment: HashMap<i64, &Submission> = submissions
        .iter()
        .map(|s| (s.assessment_id, s))
        .collect();

    let assignments: Vec<AssignmentProgress> = assessments
        .iter()
        .map(|assessment| {
            let submission = by_assessment.get(&assessment.id).copied();
            AssignmentProgress {
                assessment_id: assessment.id,
                title: assessment.title.clone(),
                description: assessment.description.clone(),
                due_date: assessment.due_date,
                total_marks: assessment.total_marks,
                submitted: submission.is_some(),
                submitted_at: submission.map(|s| s.submitted_at),
                score: submission.and_then(|s| s.score),
                graded_at: submission.and_then(|s| s.graded_at),
                feedback: submission.and_then(|s| s.feedback.clone()),
                status: assignment_status(submission),
            }
        })
        .collect();

    let mut by_quiz: HashMap<i64, Vec<&QuizAttempt>> = HashMap::new();
    for attempt in attempts {
        by_quiz.entry(attempt.quiz_id).or_default().push(attempt);
    }

    let mut quiz_scores = Vec::new();
    let quiz_progress: Vec<QuizProgress> = quizzes
        .iter()
        .map(|quiz| {
            let mut history = by_quiz.remove(&quiz.id).unwrap_or_default();
            history.sort_by(|a, b| {
                b.completed_at
                    .cmp(&a.completed_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            quiz_scores.extend(history.iter().map(|a| f64::from(a.score)));

            let latest = latest_attempt(history.iter().copied());
            QuizProgress {
                quiz_id: quiz.id,
                title: quiz.title.clone(),
                passing_score: quiz.passing_score,
                question_count: quiz.question_count,
                attempts_count: history.len() as i64,
                latest_score: latest.map(|a| a.score),
                latest_status: latest.map(|a| a.status),
                latest_completed_at: latest.map(|a| a.completed_at),
                attempts: history.into_iter().map(attempt_view).collect(),
            }
        })
        .collect();

    let graded_scores: Vec<f64> = assessments
        .iter()
        .filter_map(|a| by_assessment.get(&a.id))
        .filter_map(|s| graded_score(s))
        .collect();
    let submitted = assignments.iter().filter(|a| a.submitted).count() as i64;

    let summary = build_summary(
        assessments.len() as i64,
        submitted,
        &graded_scores,
        &quiz_scores,
    );

    StudentCourseReport {
        summary,
        assignments,
        quizzes: quiz_progress,
    }
}

/// 计算课程花名册中每个学生的表现汇总
///
/// `submissions` 与 `attempts` 为课程范围内所有学生的记录。
pub fn summarize_roster(
    student_ids: &[i64],
    assessments: &[Assessment],
    submissions: &[Submission],
    attempts: &[QuizAttempt],
) -> HashMap<i64, PerformanceSummary> {
    let mut submissions_by_student: HashMap<i64, Vec<Submission>> = HashMap::new();
    for submission in submissions {
        submissions_by_student
            .entry(submission.student_id)
            .or_default()
            .push(submission.clone());
    }

    let mut attempts_by_student: HashMap<i64, Vec<QuizAttempt>> = HashMap::new();
    for attempt in attempts {
        attempts_by_student
            .entry(attempt.student_id)
            .or_default()
            .push(attempt.clone());
    }

    student_ids
        .iter()
        .map(|student_id| {
            let student_submissions = submissions_by_student
                .get(student_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let student_attempts = attempts_by_student
                .get(student_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (
                *student_id,
                summarize_student(assessments, student_submissions, student_attempts),
            )
        })
        .collect()
}

/// 按测验统计作答次数与平均分，按 quiz_id 升序
pub fn summarize_quiz_attempts(attempts: &[QuizAttempt]) -> Vec<QuizAttemptSummary> {
    let mut scores: HashMap<i64, Vec<f64>> = HashMap::new();
    for attempt in attempts {
        scores
            .entry(attempt.quiz_id)
            .or_default()
            .push(f64::from(attempt.score));
    }

    let mut summaries: Vec<QuizAttemptSummary> = scores
        .into_iter()
        .map(|(quiz_id, scores)| QuizAttemptSummary {
            quiz_id,
            attempt_count: scores.len() as i64,
            average_score: mean_rounded(scores),
        })
        .collect();
    summaries.sort_by_key(|s| s.quiz_id);
    summaries
}

/// 作答记录的平均分（四舍五入）
pub fn average_attempt_score(attempts: &[QuizAttempt]) -> i64 {
    mean_rounded(attempts.iter().map(|a| f64::from(a.score)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::AssessmentKind;
    use crate::models::quizzes::entities::{AttemptStatus, QuizDifficulty, QuizSource};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn assessment(id: i64) -> Assessment {
        Assessment {
            id,
            course_id: 1,
            title: format!("Assignment {id}"),
            description: None,
            due_date: None,
            total_marks: 100.0,
            questions: vec![],
            kind: AssessmentKind::Manual,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn submission(id: i64, assessment_id: i64, student_id: i64, graded: Option<f64>) -> Submission {
        Submission {
            id,
            assessment_id,
            student_id,
            answers: vec![],
            submission_text: Some("done".into()),
            score: graded,
            correct_answers: 0,
            total_questions: 0,
            feedback: None,
            graded_at: graded.map(|_| ts(500)),
            graded_by: graded.map(|_| 9),
            submitted_at: ts(100),
        }
    }

    fn quiz(id: i64) -> Quiz {
        Quiz {
            id,
            course_id: 1,
            material_id: None,
            created_by: 9,
            title: format!("Quiz {id}"),
            description: None,
            time_limit: 30,
            passing_score: 70,
            show_answers: true,
            shuffle_questions: true,
            difficulty: QuizDifficulty::Medium,
            questions: vec![],
            question_count: 5,
            is_active: true,
            generated_by: QuizSource::Manual,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    fn attempt(id: i64, quiz_id: i64, student_id: i64, score: i32, completed: i64) -> QuizAttempt {
        QuizAttempt {
            id,
            quiz_id,
            student_id,
            course_id: 1,
            answers: vec![],
            score,
            total_questions: 5,
            correct_answers: 0,
            status: if score >= 70 {
                AttemptStatus::Passed
            } else {
                AttemptStatus::Failed
            },
            time_taken: 60,
            started_at: ts(completed - 60),
            completed_at: ts(completed),
        }
    }

    #[test]
    fn test_mixed_assignments_and_quizzes() {
        let assessments: Vec<_> = (1..=4).map(assessment).collect();
        let submissions = vec![
            submission(1, 1, 7, Some(80.0)),
            submission(2, 2, 7, Some(90.0)),
            submission(3, 3, 7, None),
        ];
        let attempts = vec![attempt(1, 1, 7, 70, 1000), attempt(2, 2, 7, 90, 2000)];

        let summary = summarize_student(&assessments, &submissions, &attempts);
        assert_eq!(summary.assignment_total, 4);
        assert_eq!(summary.assignment_submitted, 3);
        assert_eq!(summary.assignment_completion, 75);
        assert_eq!(summary.average_assignment_score, 85);
        assert_eq!(summary.quiz_attempts, 2);
        assert_eq!(summary.average_quiz_score, 80);
        assert_eq!(summary.performance_score, 78);
    }

    #[test]
    fn test_no_assignments_uses_quiz_average() {
        let attempts = vec![attempt(1, 1, 7, 60, 1000), attempt(2, 2, 7, 80, 2000)];
        let summary = summarize_student(&[], &[], &attempts);
        assert_eq!(summary.assignment_completion, 0);
        assert_eq!(summary.performance_score, 70);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(summarize_student(&[], &[], &[]), PerformanceSummary::default());
    }

    #[test]
    fn test_ungraded_score_not_averaged() {
        let assessments = vec![assessment(1), assessment(2)];
        let mut auto_scored = submission(1, 1, 7, None);
        auto_scored.score = Some(40.0);
        let submissions = vec![auto_scored, submission(2, 2, 7, Some(90.0))];

        let summary = summarize_student(&assessments, &submissions, &[]);
        assert_eq!(summary.assignment_completion, 100);
        assert_eq!(summary.average_assignment_score, 90);
        // 无测验时综合分为完成率与 0 的平均
        assert_eq!(summary.performance_score, 50);
    }

    #[test]
    fn test_submission_outside_catalog_ignored() {
        let assessments = vec![assessment(1)];
        let submissions = vec![submission(1, 99, 7, Some(100.0))];
        let summary = summarize_student(&assessments, &submissions, &[]);
        assert_eq!(summary.assignment_submitted, 0);
        assert_eq!(summary.average_assignment_score, 0);
    }

    #[test]
    fn test_latest_attempt_prefers_completion_time() {
        let attempts = vec![
            attempt(3, 1, 7, 50, 1000),
            attempt(1, 1, 7, 90, 3000),
            attempt(2, 1, 7, 70, 2000),
        ];
        assert_eq!(latest_attempt(&attempts).map(|a| a.id), Some(1));
        assert!(latest_attempt(&Vec::<QuizAttempt>::new()).is_none());

        let tied = vec![attempt(4, 1, 7, 50, 1000), attempt(5, 1, 7, 60, 1000)];
        assert_eq!(latest_attempt(&tied).map(|a| a.id), Some(5));
    }

    #[test]
    fn test_student_report_details() {
        let assessments = vec![assessment(1), assessment(2), assessment(3)];
        let submissions = vec![submission(1, 1, 7, Some(80.0)), submission(2, 2, 7, None)];
        let quizzes = vec![quiz(10), quiz(11)];
        let attempts = vec![
            attempt(1, 10, 7, 60, 1000),
            attempt(2, 10, 7, 80, 3000),
            // 不在目录中的测验
            attempt(3, 99, 7, 0, 4000),
        ];

        let report = build_student_report(&assessments, &submissions, &quizzes, &attempts);

        let statuses: Vec<_> = report.assignments.iter().map(|a| a.status).collect();
        assert_eq!(
            statuses,
            vec![
                AssignmentStatus::Graded,
                AssignmentStatus::Submitted,
                AssignmentStatus::Pending
            ]
        );
        assert_eq!(report.assignments[0].score, Some(80.0));
        assert!(report.assignments[2].submitted_at.is_none());

        let first = &report.quizzes[0];
        assert_eq!(first.attempts_count, 2);
        assert_eq!(first.latest_score, Some(80));
        assert_eq!(first.attempts[0].attempt_id, 2);
        assert_eq!(first.attempts[1].attempt_id, 1);

        let second = &report.quizzes[1];
        assert_eq!(second.attempts_count, 0);
        assert!(second.latest_status.is_none());

        assert_eq!(report.summary.quiz_attempts, 2);
        assert_eq!(report.summary.average_quiz_score, 70);
        assert_eq!(report.summary.assignment_completion, 67);
        assert_eq!(report.summary.average_assignment_score, 80);
        assert_eq!(report.summary.performance_score, 69);
    }

    #[test]
    fn test_roster_groups_by_student() {
        let assessments = vec![assessment(1), assessment(2)];
        let submissions = vec![
            submission(1, 1, 7, Some(70.0)),
            submission(2, 2, 7, Some(90.0)),
            submission(3, 1, 8, None),
        ];
        let attempts = vec![attempt(1, 10, 8, 100, 1000)];

        let roster = summarize_roster(&[7, 8, 9], &assessments, &submissions, &attempts);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[&7].assignment_completion, 100);
        assert_eq!(roster[&7].average_assignment_score, 80);
        assert_eq!(roster[&7].performance_score, 50);
        assert_eq!(roster[&8].assignment_completion, 50);
        assert_eq!(roster[&8].performance_score, 75);
        assert_eq!(roster[&9], build_summary(2, 0, &[], &[]));
    }

    #[test]
    fn test_quiz_attempt_summary() {
        let attempts = vec![
            attempt(1, 2, 7, 55, 1000),
            attempt(2, 1, 7, 80, 1000),
            attempt(3, 2, 8, 60, 1000),
        ];
        let summaries = summarize_quiz_attempts(&attempts);
        assert_eq!(
            summaries,
            vec![
                QuizAttemptSummary {
                    quiz_id: 1,
                    attempt_count: 1,
                    average_score: 80
                },
                QuizAttemptSummary {
                    quiz_id: 2,
                    attempt_count: 2,
                    average_score: 58
                },
            ]
        );
        assert_eq!(average_attempt_score(&attempts), 65);
        assert_eq!(average_attempt_score(&[]), 0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_score(77.5), 78);
        assert_eq!(round_score(2.5), 3);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 0), 0);
    }
}
