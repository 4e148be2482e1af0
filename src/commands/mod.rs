//! CLI command implementations for gradebook operations.
//!
//! Every command runs against a [`Session`]: the configured data file is
//! loaded into a fresh store, the command runs once, and commands that
//! change the store write it back before returning.
//!
//! Available commands:
//! - **init**: Write a default `.gradebook.toml`
//! - **student**: Register, remove, show, update and list students
//! - **grade**: Add, update, remove and show subject grades
//! - **report**: Ranking, class and subject statistics, range and grade queries
//! - **file**: Export, import, backup, restore and header checks

pub mod file;
pub mod grade;
pub mod init;
pub mod report;
pub mod session;
pub mod student;

pub use file::handle_file;
pub use grade::handle_grade;
pub use init::init_config;
pub use report::handle_report;
pub use session::Session;
pub use student::handle_student;
