//! Find every occurrence of a key in a JSON document, with a small
//! persistent history of recent searches.

pub mod app;
pub mod commands;
pub mod config;
pub mod event;
pub mod finder;
pub mod history;
pub mod logging;
pub mod notice;
pub mod query;
pub mod ui;
