pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod properties;
pub mod prospects;
pub mod query;
pub mod response;
pub mod state;
pub mod stats;
pub mod users;
pub mod votes;
