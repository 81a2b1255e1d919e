//! Static file reads and uploads under the served root directory.

use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;
use std::io;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Lexically cleans a path: drops `.` and repeated separators, folds `name/..`
/// pairs, and keeps leading `..` on relative paths. `..` directly under the
/// root of an absolute path is dropped. An empty result becomes `.`.
///
/// No filesystem access happens here, so symlinks are not resolved.
///
/// ```
/// # use std::path::Path;
/// # use waiter::routes::files::clean;
/// assert_eq!(clean(Path::new("a/./b/../c")), Path::new("a/c"));
/// assert_eq!(clean(Path::new("../a/../..")), Path::new("../.."));
/// assert_eq!(clean(Path::new("/../a")), Path::new("/a"));
/// assert_eq!(clean(Path::new("")), Path::new("."));
/// ```
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Cleans `path` and strips any root so the result can be joined under another directory.
fn clean_relative(path: &Path) -> PathBuf {
    let cleaned = clean(path);
    let relative: PathBuf = cleaned
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Where a GET for `name` reads from: `root`, a separator, then `name` cleaned.
///
/// Cleaning collapses `.` and `..` but does not confine the result to `root`;
/// a name that cleans to a leading `..` still climbs out of it.
pub fn read_target(root: &Path, name: &[u8]) -> PathBuf {
    let mut target = OsString::from(root.as_os_str());
    target.push(MAIN_SEPARATOR_STR);
    target.push(clean(&path_from_bytes(name)));
    PathBuf::from(target)
}

/// Where an upload made of `segments` lands, or `None` when the cleaned
/// path escapes `root`.
///
/// Empty segments are skipped, the rest are joined and cleaned, and the
/// result must not begin with `..`. That is a plain prefix test, so a
/// cleaned path such as `..hidden` is refused as well.
pub fn write_target(root: &Path, segments: &[Vec<u8>]) -> Option<PathBuf> {
    let joined = segments
        .iter()
        .filter(|s| !s.is_empty())
        .map(Vec::as_slice)
        .collect::<Vec<_>>()
        .join(&b'/');

    let relative = clean_relative(&path_from_bytes(&joined));
    if relative.as_os_str().as_encoded_bytes().starts_with(b"..") {
        return None;
    }

    if relative == Path::new(".") {
        Some(root.to_path_buf())
    } else {
        Some(root.join(relative))
    }
}

/// Decoded segments are raw bytes; on unix they map onto the path unchanged.
#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

pub async fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path).await
}

/// Creates missing parent directories, then creates or truncates `path` and
/// writes `contents` to it.
pub async fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dirs(parent).await?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o644);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    Ok(())
}

async fn create_dirs(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(dir).await
}
