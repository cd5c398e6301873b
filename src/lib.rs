//! Menu-driven static file server.
//!
//! Presents a numbered list of preconfigured directories on standard
//! output, reads one selection from standard input, and serves the chosen
//! directory over HTTP/1.1 on port 8000 until the shutdown signal fires.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod menu;
pub mod registry;
pub mod server;
