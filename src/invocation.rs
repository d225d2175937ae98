//! Rewrites a compilation entry into an include-what-you-use invocation.

use crate::compdb::{CompileCommand, is_header};
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// Language pair inserted for headers so they are parsed as C++ sources.
pub const HEADER_LANGUAGE_FLAGS: [&str; 2] = ["-x", "c++-header"];

/// Builds the analyzer command line for `target` from `entry`.
///
/// Returns `None` when the entry carries no usable command.
pub fn build_command(
    entry: &CompileCommand,
    analyzer: &Path,
    target: &Path,
) -> Option<Vec<String>> {
    let mut args = entry_tokens(entry)?;
    if args.is_empty() {
        return None;
    }

    args[0] = analyzer.to_string_lossy().into_owned();

    let target_str = target.to_string_lossy().into_owned();
    let target_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty());

    let mut replaced = false;
    for arg in args.iter_mut().skip(1) {
        let names_entry =
            !entry.file.as_os_str().is_empty() && entry.file.as_os_str() == OsStr::new(arg.as_str());
        let names_target = target_name.as_deref().is_some_and(|name| arg.ends_with(name));
        if names_entry || names_target {
            *arg = target_str.clone();
            replaced = true;
        }
    }
    if !replaced {
        args.push(target_str);
    }

    if is_header(target) && !has_language_flag(&args[1..]) {
        for (offset, flag) in HEADER_LANGUAGE_FLAGS.iter().enumerate() {
            args.insert(1 + offset, flag.to_string());
        }
    }

    debug!(?args, "built analyzer command");
    Some(args)
}

fn entry_tokens(entry: &CompileCommand) -> Option<Vec<String>> {
    if let Some(arguments) = &entry.arguments {
        return Some(arguments.clone());
    }
    let command = entry.command.as_deref().unwrap_or_default();
    match shlex::split(command) {
        Some(tokens) => Some(tokens),
        None => {
            debug!(command, "could not split command string");
            None
        }
    }
}

/// `-x <lang>` or the joined `-x<lang>` spelling.
fn has_language_flag(args: &[String]) -> bool {
    args.iter().any(|arg| arg.starts_with("-x"))
}
