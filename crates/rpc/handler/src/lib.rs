pub use router::router;
pub use web_server::start_web_server_worker;

mod dto;
mod handler;
mod router;
mod web_server;
