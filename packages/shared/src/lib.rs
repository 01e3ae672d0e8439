//! Utilities shared by the SmileSync server and client.

pub mod logger;
pub mod time;
