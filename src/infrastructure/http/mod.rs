//! HTTP Layer - RPC 端点

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
