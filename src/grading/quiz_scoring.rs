//! 测验与作业判分

use crate::grading::performance::percentage;
use crate::models::assessments::entities::AssessmentQuestion;
use crate::models::quizzes::entities::{AttemptAnswer, AttemptStatus, QuizQuestion};
use crate::models::quizzes::requests::SubmittedAnswer;

/// 测验判分结果
#[derive(Debug, Clone, PartialEq)]
pub struct QuizScore {
    pub answers: Vec<AttemptAnswer>,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub score: i32,
    pub status: AttemptStatus,
}

/// 按题目位置对答卷判分
///
/// 选项下标与标准答案完全相等才算正确；超出题目数量的作答记为错误。
/// 题目为空时得分为 0。
pub fn score_quiz(
    questions: &[QuizQuestion],
    answers: &[SubmittedAnswer],
    passing_score: i32,
) -> QuizScore {
    let recorded: Vec<AttemptAnswer> = answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let is_correct = match (questions.get(index), answer.selected_answer) {
                (Some(question), Some(selected)) => selected == question.correct_answer,
                _ => false,
            };
            AttemptAnswer {
                question_index: index as i32,
                selected_answer: answer.selected_answer,
                is_correct,
                time_spent: answer.time_spent.unwrap_or(0).max(0),
            }
        })
        .collect();

    let correct_answers = recorded.iter().filter(|a| a.is_correct).count() as i32;
    let total_questions = questions.len() as i32;
    let score = percentage(i64::from(correct_answers), i64::from(total_questions)) as i32;
    let status = if score >= passing_score {
        AttemptStatus::Passed
    } else {
        AttemptStatus::Failed
    };

    QuizScore {
        answers: recorded,
        correct_answers,
        total_questions,
        score,
        status,
    }
}

/// 作业答卷判分结果：(正确数, 题目数, 百分制得分)
pub fn score_answer_sheet(questions: &[AssessmentQuestion], answers: &[i32]) -> (i32, i32, i32) {
    let correct = questions
        .iter()
        .zip(answers.iter())
        .filter(|(question, answer)| question.correct_answer == **answer)
        .count() as i32;
    let total = questions.len() as i32;
    let score = percentage(i64::from(correct), i64::from(total)) as i32;
    (correct, total, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuizDifficulty;

    fn questions(n: usize) -> Vec<QuizQuestion> {
        (0..n)
            .map(|i| QuizQuestion {
                question: format!("Question {i}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: 1,
                explanation: None,
                difficulty: QuizDifficulty::Medium,
            })
            .collect()
    }

    fn answer(selected: Option<i32>) -> SubmittedAnswer {
        SubmittedAnswer {
            selected_answer: selected,
            time_spent: Some(12),
        }
    }

    #[test]
    fn test_three_of_five_fails_at_seventy() {
        let answers = vec![
            answer(Some(1)),
            answer(Some(0)),
            answer(Some(1)),
            answer(Some(1)),
            answer(None),
        ];
        let result = score_quiz(&questions(5), &answers, 70);

        assert_eq!(result.correct_answers, 3);
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.score, 60);
        assert_eq!(result.status, AttemptStatus::Failed);

        let correct_indexes: Vec<i32> = result
            .answers
            .iter()
            .filter(|a| a.is_correct)
            .map(|a| a.question_index)
            .collect();
        assert_eq!(correct_indexes, vec![0, 2, 3]);
        assert_eq!(result.answers[4].selected_answer, None);
    }

    #[test]
    fn test_pass_at_threshold() {
        let answers = vec![answer(Some(1)); 7];
        let result = score_quiz(&questions(10), &answers, 70);
        assert_eq!(result.score, 70);
        assert_eq!(result.status, AttemptStatus::Passed);
    }

    #[test]
    fn test_extra_answers_are_incorrect() {
        let answers = vec![answer(Some(1)), answer(Some(1)), answer(Some(1))];
        let result = score_quiz(&questions(2), &answers, 50);
        assert_eq!(result.answers.len(), 3);
        assert!(!result.answers[2].is_correct);
        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let result = score_quiz(&[], &[answer(Some(0))], 0);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_questions, 0);
        // 及格线为 0 时仍判为通过
        assert_eq!(result.status, AttemptStatus::Passed);
    }

    #[test]
    fn test_negative_time_spent_clamped() {
        let answers = vec![SubmittedAnswer {
            selected_answer: Some(1),
            time_spent: Some(-5),
        }];
        let result = score_quiz(&questions(1), &answers, 70);
        assert_eq!(result.answers[0].time_spent, 0);
    }

    #[test]
    fn test_answer_sheet_scoring() {
        let questions: Vec<AssessmentQuestion> = [2, 0, 1]
            .iter()
            .map(|&correct| AssessmentQuestion {
                text: "q".into(),
                options: vec!["x".into(), "y".into(), "z".into()],
                correct_answer: correct,
                explanation: None,
            })
            .collect();
        assert_eq!(score_answer_sheet(&questions, &[2, 0]), (2, 3, 67));
        assert_eq!(score_answer_sheet(&questions, &[2, 0, 1, 1]), (3, 3, 100));
        assert_eq!(score_answer_sheet(&[], &[1]), (0, 0, 0));
    }
}
