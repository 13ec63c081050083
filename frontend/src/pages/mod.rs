pub mod dashboard;
pub mod file_details;
pub mod logs;
pub mod settings;
