//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_session_state, health_check, login};
pub use websocket::websocket_handler;
