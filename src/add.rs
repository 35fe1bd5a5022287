//! Bulk adder: copy files from a [`Filesystem`] into the archive.
//!
//! Each input path maps to a file to read and an entry name to store it
//! under:
//!
//! | input            | root    | file read              | entry name       |
//! |------------------|---------|------------------------|------------------|
//! | `contents/a.txt` | none    | `contents/a.txt`       | `contents/a.txt` |
//! | `contents/a.txt` | `/data` | `/data/contents/a.txt` | `contents/a.txt` |
//! | `/data/c/a.txt`  | `/data` | `/data/c/a.txt`        | `c/a.txt`        |

use std::path::{Component, Path, PathBuf};

use crate::archive::Archive;
use crate::error::{Error, Result};
use crate::io::Filesystem;

impl Archive {
    /// Read `path` through `fs` and store it, optionally rooted under `root`.
    ///
    /// The archive is unchanged if the file cannot be read.
    pub async fn add<F>(&mut self, fs: &F, path: impl AsRef<Path>, root: Option<&Path>) -> Result<()>
    where
        F: Filesystem + ?Sized,
    {
        let (file_path, zip_path) = locate(path.as_ref(), root)?;
        tracing::trace!(
            method = "add",
            file_path = %file_path.display(),
            zip_path = %zip_path,
            "called"
        );

        let document = fs.read_bytes(&file_path).await?;
        self.write_buffer(&zip_path, document).await
    }

    /// [`add`](Archive::add) every path in order, stopping at the first failure.
    ///
    /// Entries added before the failing path stay in the archive.
    pub async fn add_all<F, I, P>(&mut self, fs: &F, paths: I, root: Option<&Path>) -> Result<()>
    where
        F: Filesystem + ?Sized,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        tracing::trace!(method = "add.all", "called");

        for path in paths {
            self.add(fs, path, root).await?;
        }
        Ok(())
    }
}

/// Split an input path into (file to read, entry name).
fn locate(path: &Path, root: Option<&Path>) -> Result<(PathBuf, String)> {
    match root {
        Some(root) if path.is_absolute() => {
            let relative = path.strip_prefix(root).map_err(|_| {
                Error::InvalidArgument(format!(
                    "{} is not under {}",
                    path.display(),
                    root.display()
                ))
            })?;
            Ok((path.to_path_buf(), entry_name(relative)?))
        }
        Some(root) => Ok((root.join(path), utf8(path)?.to_string())),
        None => Ok((path.to_path_buf(), utf8(path)?.to_string())),
    }
}

/// Join the normal components of a relative path with `/`.
fn entry_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| not_utf8(relative))?,
            ),
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "cannot map {} to an entry name",
                    relative.display()
                )));
            }
        }
    }
    if parts.is_empty() {
        return Err(Error::InvalidArgument("path names the root itself".into()));
    }
    Ok(parts.join("/"))
}

fn utf8(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| not_utf8(path))
}

fn not_utf8(path: &Path) -> Error {
    Error::InvalidArgument(format!("{} is not valid UTF-8", path.display()))
}
