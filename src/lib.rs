//! Lead SMS: inbound SMS lead capture.

pub mod config;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod store;
pub mod webhook;
