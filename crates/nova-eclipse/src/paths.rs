use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Render `path` the way the IDE descriptors expect it: relative to `basedir` when
/// both share an anchor, `/`-separated.
///
/// Relative input is taken as already relative to `basedir`. Absolute paths outside
/// `basedir` walk up with `..`; paths on another root or prefix stay absolute.
pub fn descriptor_path(basedir: &Path, path: &Path) -> String {
    let path = normalize(path);
    if path.is_relative() {
        return to_slash(&path);
    }

    match relative_to(&normalize(basedir), &path) {
        Some(rel) => to_slash(&rel),
        None => to_slash(&path),
    }
}

fn relative_to(base: &Path, path: &Path) -> Option<PathBuf> {
    let mut base_iter = base.components();
    let mut path_iter = path.components();

    // Prefix and root must agree before anything can be expressed relatively.
    loop {
        match (base_iter.clone().next(), path_iter.clone().next()) {
            (Some(b @ (Component::Prefix(_) | Component::RootDir)), Some(p)) if b == p => {
                base_iter.next();
                path_iter.next();
            }
            (Some(Component::Prefix(_) | Component::RootDir), _)
            | (_, Some(Component::Prefix(_) | Component::RootDir)) => return None,
            _ => break,
        }
    }

    let base_rest: Vec<Component<'_>> = base_iter.collect();
    let path_rest: Vec<Component<'_>> = path_iter.collect();
    let common = base_rest
        .iter()
        .zip(&path_rest)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_rest.len() {
        out.push("..");
    }
    for component in &path_rest[common..] {
        out.push(component.as_os_str());
    }
    Some(out)
}

/// Lexically drop `.` and resolve `..` against preceding segments.
fn normalize(path: &Path) -> PathBuf {
    let mut prefix: Option<OsString> = None;
    let mut has_root = false;
    let mut stack: Vec<OsString> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix_component) => {
                prefix = Some(prefix_component.as_os_str().to_owned());
            }
            Component::RootDir => has_root = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(last) = stack.last() {
                    if last != ".." {
                        stack.pop();
                        continue;
                    }
                }

                if !has_root {
                    stack.push(OsString::from(".."));
                }
            }
            Component::Normal(segment) => stack.push(segment.to_owned()),
        }
    }

    let mut out = PathBuf::new();
    if let Some(prefix) = prefix {
        out.push(prefix);
    }
    if has_root {
        out.push(std::path::MAIN_SEPARATOR.to_string());
    }
    out.extend(stack);
    out
}

fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::RootDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();

    let joined = parts.join("/");
    if path.has_root() {
        match path.components().next() {
            // `C:` already leads the joined string.
            Some(Component::Prefix(_)) => joined,
            _ => format!("/{joined}"),
        }
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
