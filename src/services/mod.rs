pub mod aggregate;
pub mod cookbook;
pub mod forms;
