pub mod handlers;
pub mod repo;

pub use handlers::user_routes;
