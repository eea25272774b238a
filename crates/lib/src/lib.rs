//! Zpathconverter core library: path conversion, the Slack Socket Mode
//! transport, and the liveness endpoint used by the binary.

pub mod bot;
pub mod config;
pub mod convert;
pub mod listener;
pub mod liveness;
pub mod slack;
