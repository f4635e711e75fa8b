// The library holds the whole tutor so the binary, the integration tests and
// the benches share one module tree.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod keyboard;
pub mod session;
pub mod store;
