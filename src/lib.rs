// src/lib.rs
pub mod app;
pub mod catalog;
pub mod cli;
pub mod errors;
pub mod events;
pub mod grid;
pub mod host;
pub mod logging;
pub mod podcast;
pub mod registry;
pub mod services;
pub mod ui;
pub mod widgets;
