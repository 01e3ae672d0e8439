//! Infrastructure layer
//!
//! ドメイン層が定義する trait（MessagePusher, RecordStore, ImageGenerator）の
//! 具体的な実装と、ワイヤーフォーマットの DTO を提供します。

pub mod dto;
pub mod image_generator;
pub mod message_pusher;
pub mod record_store;
