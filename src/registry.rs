//! Server option registry.
//!
//! The set of directories the launcher offers is fixed at build time.
//! Keys are unique small integers; paths are relative to the working
//! directory the process was started from.

/// Built-in option table, in menu order.
const OPTIONS: &[(u32, &str)] = &[
    (1, "topology_map_editor/out"),
    (2, "server_folder_2"),
    (3, "server_folder_3"),
];

/// Fixed table of selectable (key, directory) pairs.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<(u32, String)>,
}

impl Registry {
    /// The option table compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: OPTIONS
                .iter()
                .map(|&(key, path)| (key, path.to_string()))
                .collect(),
        }
    }

    /// Ordered (key, path) pairs for menu display.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.entries.iter().map(|(key, path)| (*key, path.as_str()))
    }

    /// Look up the directory registered under `key`.
    #[must_use]
    pub fn resolve(&self, key: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, path)| path.as_str())
    }

    #[cfg(test)]
    pub(crate) fn of(entries: &[(u32, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(key, path)| (key, path.to_string()))
                .collect(),
        }
    }
}
