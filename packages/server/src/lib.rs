//! SmileSync realtime hub.
//!
//! Every connected participant shares one meeting session: chat, a
//! cumulative smile score, an idea counter, a level derived from the score
//! and reward images generated on level-up. State changes are fanned out
//! to all connections over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod app;
pub mod config;
