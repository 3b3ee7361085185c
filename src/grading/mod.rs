//! 成绩计算
//!
//! 测验判分与学生表现汇总，均不涉及 I/O。

pub mod performance;
pub mod quiz_scoring;

pub use performance::{
    build_student_report, latest_attempt, summarize_quiz_attempts, summarize_roster,
    summarize_student,
};
pub use quiz_scoring::{QuizScore, score_answer_sheet, score_quiz};
