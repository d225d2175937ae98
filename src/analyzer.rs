//! Locates the include-what-you-use binary on the executable search path.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable names tried in order.
pub const ANALYZER_NAMES: [&str; 2] = ["include-what-you-use", "iwyu"];

/// Returns the first analyzer found on `PATH`.
pub fn find_analyzer() -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    let cwd = env::current_dir().ok()?;
    find_analyzer_in(paths, cwd)
}

/// Same as [`find_analyzer`] but searches an explicit path list.
pub fn find_analyzer_in<P, C>(paths: P, cwd: C) -> Option<PathBuf>
where
    P: AsRef<OsStr>,
    C: AsRef<Path>,
{
    ANALYZER_NAMES.iter().find_map(|name| {
        match which::which_in(name, Some(paths.as_ref()), cwd.as_ref()) {
            Ok(path) => {
                debug!(name, path = %path.display(), "found analyzer");
                Some(path)
            }
            Err(err) => {
                debug!(name, %err, "analyzer candidate not on PATH");
                None
            }
        }
    })
}
