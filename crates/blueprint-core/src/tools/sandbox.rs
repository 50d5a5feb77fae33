//! File-system access confined to a single project root.

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use log::debug;
use walkdir::WalkDir;

use super::shell::{self, CommandOutput};
use crate::error::{AgentError, IoResultExt, Result};

/// Returned by [`Sandbox::list`] when the directory holds no files.
pub const NO_FILES: &str = "No files found.";

/// Project root that every path handed to a tool is resolved against.
///
/// Paths are always interpreted relative to the root; anything that resolves
/// outside it (through `..`, an absolute path, or a symlink) is rejected with
/// [`AgentError::PathEscape`]. The root itself counts as inside.
///
/// # Examples
///
/// ```rust
/// use blueprint_core::tools::Sandbox;
///
/// # fn example() -> blueprint_core::Result<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let sandbox = Sandbox::open(dir.path().join("generated_project"))?;
///
/// sandbox.write("src/app.js", "console.log('hi');")?;
/// assert_eq!(sandbox.read("src/app.js")?, "console.log('hi');");
/// assert_eq!(sandbox.read("missing.txt")?, "");
/// assert!(sandbox.resolve("../outside.txt").is_err());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Opens `root`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::FileSystem`] if the directory cannot be created
    /// or canonicalized.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).fs_context(root)?;
        let root = fs::canonicalize(root).fs_context(root)?;
        debug!("Project root: {}", root.display());
        Ok(Self { root })
    }

    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The project root as a string.
    pub fn current_directory(&self) -> String {
        self.root.display().to_string()
    }

    /// Resolves `path` against the root.
    ///
    /// `.` and `..` are folded lexically, then the longest existing ancestor
    /// is canonicalized so symlinks are followed.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PathEscape`] unless the result is the root or
    /// lies beneath it.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize(&self.root.join(path));
        let resolved = self.canonicalize_lenient(path, &normalized)?;

        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(self.escape(path))
        }
    }

    /// Creates or overwrites `path` with `content`, creating parent
    /// directories. Returns `WROTE:<resolved path>`.
    pub fn write(&self, path: &str, content: &str) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).fs_context(parent)?;
        }
        fs::write(&target, content).fs_context(&target)?;
        debug!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(format!("WROTE:{}", target.display()))
    }

    /// Reads `path` as UTF-8. A file that does not exist reads as `""`.
    pub fn read(&self, path: &str) -> Result<String> {
        let target = self.resolve(path)?;
        match fs::read_to_string(&target) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(AgentError::file_system(target, e)),
        }
    }

    /// Lists every file under `directory`, recursively, one path per line.
    ///
    /// Paths are relative to the project root and sorted, so the listing does
    /// not depend on the order files were written in. Returns [`NO_FILES`]
    /// for an empty tree and an `ERROR: ...` line when `directory` is not a
    /// directory.
    pub fn list(&self, directory: &str) -> Result<String> {
        let dir = self.resolve(directory)?;
        if !dir.is_dir() {
            return Ok(format!("ERROR: {} is not a directory", dir.display()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir) {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| dir.clone(), Path::to_path_buf);
                AgentError::file_system(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            files.push(relative.to_string_lossy().into_owned());
        }
        files.sort();

        if files.is_empty() {
            Ok(NO_FILES.to_string())
        } else {
            Ok(files.join("\n"))
        }
    }

    /// Runs a shell command inside the sandbox.
    ///
    /// `cwd` is resolved like any other path; `None` means the root.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PathEscape`] for an escaping `cwd` and
    /// [`AgentError::CommandTimeout`] when `timeout` expires.
    pub fn run_command(
        &self,
        cmd: &str,
        cwd: Option<&str>,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        let dir = match cwd {
            Some(cwd) => self.resolve(cwd)?,
            None => self.root.clone(),
        };
        shell::run(cmd, &dir, timeout)
    }

    fn escape(&self, path: &str) -> AgentError {
        AgentError::PathEscape {
            path: path.to_string(),
            root: self.root.clone(),
        }
    }

    /// Canonicalizes the longest existing ancestor of `path` and re-appends
    /// the components that do not exist yet.
    fn canonicalize_lenient(&self, requested: &str, path: &Path) -> Result<PathBuf> {
        let mut existing = path;
        let mut missing: Vec<OsString> = Vec::new();

        loop {
            match fs::canonicalize(existing) {
                Ok(mut base) => {
                    for name in missing.iter().rev() {
                        base.push(name);
                    }
                    return Ok(base);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    // Dangling symlinks are rejected.
                    if fs::symlink_metadata(existing).is_ok() {
                        return Err(self.escape(requested));
                    }
                    match (existing.parent(), existing.file_name()) {
                        (Some(parent), Some(name)) => {
                            missing.push(name.to_os_string());
                            existing = parent;
                        }
                        _ => return Err(AgentError::file_system(path, e)),
                    }
                }
                Err(e) => return Err(AgentError::file_system(path, e)),
            }
        }
    }
}

/// Folds `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
