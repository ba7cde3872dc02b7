//! Database entities.

pub mod comment;
pub mod number_record;
pub mod report;
pub mod user;

pub use comment::Entity as Comment;
pub use number_record::Entity as NumberRecord;
pub use report::Entity as Report;
pub use user::Entity as User;
