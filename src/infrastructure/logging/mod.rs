//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty formatting on stderr
//! - `RUST_LOG` refinement through `EnvFilter`

pub mod logger;

pub use logger::init;
