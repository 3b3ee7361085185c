pub mod assessments;

pub mod auth;

pub mod courses;

pub mod enrollments;

pub mod materials;

pub mod quizzes;

pub mod system;

pub mod users;

pub use assessments::configure_assessment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use enrollments::configure_enrollment_routes;
pub use materials::configure_material_routes;
pub use quizzes::configure_quiz_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
