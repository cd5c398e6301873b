//! Request handler module
//!
//! Request routing and static file serving for the session root.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
