//! Fixed session locations

use std::path::PathBuf;

/// Storage key holding the raw session token
pub const TOKEN_KEY: &str = "qr_jwt";

/// Path of the login view
pub const LOGIN_PATH: &str = "/login";

/// Where a successful login lands when no return path was carried
pub const HOME_PATH: &str = "/apartments";

/// Default session file: `<local data dir>/stayfolio/session.json`.
///
/// Returns `None` on platforms without a local data directory.
pub fn default_session_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("stayfolio").join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_file_shape() {
        if let Some(path) = default_session_file() {
            assert!(path.ends_with("stayfolio/session.json"));
        }
    }
}
