pub mod handlers;
pub mod server;

pub use handlers::configure_routes;
