// src/repo/mod.rs
//
// Explicit persistence seam. The quest engine sees only the
// `ContentRepository` trait; handlers load and save users, classrooms and
// log entries through the plain query modules below.

pub mod chapters;
pub mod classrooms;
pub mod content;
pub mod logs;
pub mod memory;
pub mod rewards;
pub mod users;

pub use content::{ContentRepository, PgContentRepository};
