pub mod assessments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod materials;
pub mod quizzes;
pub mod system;
pub mod users;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use materials::MaterialService;
pub use quizzes::QuizService;
pub use system::SystemService;
pub use users::UserService;
