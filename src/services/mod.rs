pub mod auth;
pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod editor;
pub mod settings;
pub mod submission;
pub mod testimonials;

pub use auth::AuthService;
pub use contact::ContactPage;
pub use courses::CoursesPage;
pub use dashboard::{DashboardStats, load_stats};
pub use editor::Editor;
pub use submission::{
    Attachments, SubmissionCoordinator, SubmissionState, SubmitMode, SubmitOutcome,
};
pub use testimonials::TestimonialsPage;
