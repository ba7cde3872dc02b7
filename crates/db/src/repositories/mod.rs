//! Database repositories.

mod comment;
mod number_record;
mod report;
mod user;

pub use comment::CommentRepository;
pub use number_record::NumberRecordRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
