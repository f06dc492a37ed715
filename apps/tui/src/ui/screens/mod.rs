pub mod confirm;
pub mod dashboard;
pub mod help;
pub mod summary;
