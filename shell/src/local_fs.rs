//! Local filesystem primitives backing the fsh commands.
//!
//! Thin synchronous wrappers over `std::fs`, plus the two recursive
//! traversals (tree copy and name search) built on `walkdir`.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use walkdir::WalkDir;

/// Parse a permission mode given as 1-4 octal digits.
///
/// Returns `None` for anything else: empty strings, longer strings,
/// non-octal characters. A mode of zero is rejected as well.
pub fn parse_mode(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return None;
    }
    match u32::from_str_radix(s, 8) {
        Ok(0) | Err(_) => None,
        Ok(mode) => Some(mode),
    }
}

/// Entry names under a directory, sorted.
///
/// A non-directory target yields its own filename; a missing target is
/// an error.
pub fn list_entries(path: &Path) -> io::Result<Vec<String>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        let name = path.file_name().map_or_else(
            || path.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        );
        return Ok(vec![name]);
    }

    let mut names = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Copy `src` to `dst`, recursing into directories.
///
/// Directory trees are mirrored entry-by-entry under `dst` by relative
/// path: directories are created, symlinks are recreated pointing at
/// the same target (any pre-existing entry at the destination path is
/// unlinked first), and regular files are copied with overwrite. A
/// single file is copied after creating the destination's parents.
/// The first error aborts the whole copy; entries already written stay.
pub fn copy_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::metadata(src)?;
    if !metadata.is_dir() {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dst)?;
        return Ok(());
    }

    fs::create_dir_all(dst)?;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let out = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&out)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(entry.path())?;
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            // Recreate the link fresh; a leftover entry would make
            // symlink creation fail.
            let _ = fs::remove_file(&out);
            std::os::unix::fs::symlink(&target, &out)?;
        } else {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &out)?;
        }
    }
    Ok(())
}

/// Rename `from` to `to` via the filesystem's atomic rename.
pub fn rename(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

/// Remove an entry: directories recursively, everything else (symlinks
/// included, never followed) as a single unlink.
pub fn remove(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Create a directory and all missing parents.
pub fn create_dirs(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Create `path` if absent, leaving existing content untouched.
pub fn touch(path: &Path) -> io::Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
}

/// Set permission bits on `path`.
pub fn chmod(path: &Path, mode: u32) -> io::Result<()> {
    let perms = fs::Permissions::from_mode(mode);
    fs::set_permissions(path, perms)
}

/// Walk every descendant of `root` and call `matched` with the
/// root-relative path of each entry whose filename contains `pattern`.
///
/// Matches are emitted as they are found; an error mid-walk aborts
/// without retracting anything already emitted.
pub fn search_names<F>(root: &Path, pattern: &str, mut matched: F) -> io::Result<()>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_name().to_string_lossy().contains(pattern) {
            let rel = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            matched(rel)?;
        }
    }
    Ok(())
}
