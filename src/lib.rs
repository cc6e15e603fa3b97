pub mod app;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod mail;
pub mod report;
pub mod ui;
