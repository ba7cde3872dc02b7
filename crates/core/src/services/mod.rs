//! Business logic services.

pub mod comment;
pub mod dashboard;
pub mod number;
pub mod report;
pub mod user;

pub use comment::CommentService;
pub use dashboard::DashboardService;
pub use number::NumberService;
pub use report::ReportService;
pub use user::UserService;
