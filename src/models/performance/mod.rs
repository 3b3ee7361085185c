pub mod entities;

pub use entities::{
    AssignmentProgress, AssignmentStatus, AttemptView, PerformanceSummary, QuizAttemptSummary,
    QuizProgress, StudentCourseReport,
};
