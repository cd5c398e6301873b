// Application state module
// Immutable state shared by every connection task of one server session

use std::path::PathBuf;

use super::types::Config;

/// State of one server session.
///
/// The session root is chosen by the launcher before the server starts and
/// never changes afterwards. Request handlers receive it through this
/// state; the process working directory is left alone.
pub struct AppState {
    pub config: Config,
    /// Absolute path of the directory being served.
    pub root: PathBuf,
}

impl AppState {
    #[must_use]
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
