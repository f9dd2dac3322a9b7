pub mod handlers;
pub mod report;
pub mod repo;

pub use handlers::stats_routes;
