pub mod aggregator;
pub mod airports;
pub mod api;
pub mod app;
pub mod cards;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod search;
pub mod status;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
