pub mod conf;
pub mod logging;
pub mod report;
