// Library interface for testing

pub mod config;
pub mod constants;
pub mod error;
pub mod photo;
pub mod report;
pub mod schedule;
pub mod session;
pub mod sort;

pub use error::{Error, Result};
pub use schedule::{extract_sessions, AppointmentTableParser, ScheduleParser};
pub use session::Session;
pub use sort::{sort_photos, FolderNaming, SortReport};
