pub mod analyze;
pub mod app;
pub mod process;
pub mod scan;
