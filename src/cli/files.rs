//! Notebook path arguments.
//!
//! Arguments containing `*` are expanded against the file system; every
//! other argument is taken literally. Within a pattern, `*` matches any run
//! of characters and `?` matches exactly one, both confined to a single
//! path component. A pattern that matches nothing expands to nothing.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Expand CLI arguments into candidate paths, in argument order.
pub fn expand_arguments(args: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for arg in args {
        if arg.contains('*') {
            let matches = expand_pattern(arg);
            tracing::debug!("Pattern {} matched {} paths", arg, matches.len());
            paths.extend(matches);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    paths
}

/// Expand one wildcard pattern into the existing paths it matches, sorted.
pub fn expand_pattern(pattern: &str) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::new()];

    for component in Path::new(pattern).components() {
        let Component::Normal(part) = component else {
            // Root, prefix, `.` and `..` are taken as-is
            for candidate in &mut candidates {
                candidate.push(component.as_os_str());
            }
            continue;
        };

        let part = part.to_string_lossy();
        candidates = if has_wildcard(&part) {
            let mut matched = Vec::new();
            for dir in &candidates {
                matched.extend(matching_children(dir, &part));
            }
            matched.sort();
            matched
        } else {
            candidates
                .into_iter()
                .map(|c| c.join(&*part))
                .filter(|c| c.exists())
                .collect()
        };

        if candidates.is_empty() {
            break;
        }
    }

    candidates
}

fn has_wildcard(part: &str) -> bool {
    part.contains('*') || part.contains('?')
}

/// Entries of `dir` whose names match `pattern`.
///
/// Hidden entries only match patterns that start with `.`.
fn matching_children(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let read_from = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let Ok(entries) = fs::read_dir(read_from) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') && !pattern.starts_with('.') {
                return None;
            }
            wildcard_match(pattern, &name).then(|| dir.join(&name))
        })
        .collect()
}

/// Glob-style matching of a single name: `*` matches any characters, `?` one.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` seen and the name index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    n = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
