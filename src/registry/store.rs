//! Symlink registry over the managed home directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, WorkonError};
use crate::venv::{validate_directory_exists, validate_link_name, VirtualEnvironment};

use super::link::{LinkStatus, ManagedLink};

/// How a link target is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Store the canonical absolute target instead of a path relative to
    /// the home directory.
    pub resolve: bool,
    /// Compute the outcome without touching the filesystem.
    pub dry_run: bool,
}

/// What `create_link` / `replace_link` did (or would do).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// A new link was created.
    Created,
    /// An identical link already existed.
    Unchanged,
    /// An existing link was replaced.
    Replaced,
}

/// Result of a link operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    /// The link as it is (or would be) on disk.
    pub link: ManagedLink,
    /// What happened.
    pub action: LinkAction,
}

/// Registry of environment symlinks under one home directory.
///
/// Holds no state besides the path: every query re-scans the directory.
#[derive(Debug, Clone)]
pub struct SymlinkRegistry {
    home: PathBuf,
}

impl SymlinkRegistry {
    /// Create a registry for `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// The managed home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Path of the entry called `name`.
    ///
    /// Fails with [`WorkonError::InvalidLinkName`] unless `name` is a single
    /// plain component, so the result is always directly inside the home.
    pub fn link_path(&self, name: &str) -> Result<PathBuf> {
        validate_link_name(name)?;
        Ok(self.home.join(name))
    }

    /// Iterate over home directory entries in filesystem order.
    ///
    /// Each call starts a fresh scan. A missing home directory yields
    /// nothing. Entries that cannot be read come back as `Err` without
    /// ending the iteration.
    pub fn list(&self) -> Result<Links> {
        match fs::read_dir(&self.home) {
            Ok(entries) => Ok(Links {
                entries: Some(entries),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Home directory {} does not exist", self.home.display());
                Ok(Links { entries: None })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All readable entries sorted by name.
    pub fn list_sorted(&self) -> Result<Vec<ManagedLink>> {
        let mut links = self.collect_readable()?;
        links.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(links)
    }

    /// Entries with [`LinkStatus::Broken`].
    pub fn find_invalid_links(&self) -> Result<Vec<ManagedLink>> {
        Ok(self
            .collect_readable()?
            .into_iter()
            .filter(ManagedLink::is_broken)
            .collect())
    }

    fn collect_readable(&self) -> Result<Vec<ManagedLink>> {
        let mut out = Vec::new();
        for entry in self.list()? {
            match entry {
                Ok(link) => out.push(link),
                Err(e) => warn!("Skipping unreadable entry in {}: {}", self.home.display(), e),
            }
        }
        Ok(out)
    }

    /// Link `venv` into the home directory.
    ///
    /// The name defaults to the environment's name. An identical existing
    /// link is left alone; any other existing entry fails with
    /// [`WorkonError::LinkAlreadyExists`].
    pub fn create_link(
        &self,
        venv: &VirtualEnvironment,
        link_name: Option<&str>,
        options: LinkOptions,
    ) -> Result<LinkOutcome> {
        validate_directory_exists(&self.home)?;

        let link = self.link_path(link_name.unwrap_or(venv.name()))?;
        let target = self.link_target(venv, options.resolve)?;

        if options.dry_run {
            return match self.existing_conflict(&link, &target, venv)? {
                Existing::None => Ok(self.outcome(&link, &target, LinkAction::Created)),
                Existing::Same => Ok(self.outcome(&link, &target, LinkAction::Unchanged)),
                Existing::Different(existing) => Err(WorkonError::LinkAlreadyExists {
                    link,
                    existing,
                }),
            };
        }

        match make_symlink(&target, &link) {
            Ok(()) => {
                info!("Create symlink {} -> {}", link.display(), target.display());
                Ok(self.outcome(&link, &target, LinkAction::Created))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                match self.existing_conflict(&link, &target, venv)? {
                    Existing::Same => {
                        debug!("Leave symlink {}", link.display());
                        Ok(self.outcome(&link, &target, LinkAction::Unchanged))
                    }
                    Existing::None => {
                        // Removed between the two calls; one more attempt.
                        make_symlink(&target, &link)?;
                        info!("Create symlink {} -> {}", link.display(), target.display());
                        Ok(self.outcome(&link, &target, LinkAction::Created))
                    }
                    Existing::Different(existing) => {
                        Err(WorkonError::LinkAlreadyExists { link, existing })
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Link `venv`, replacing an existing symlink of the same name.
    ///
    /// Only symlinks are replaced; a real file or directory in the way
    /// fails with [`WorkonError::NotASymlink`].
    pub fn replace_link(
        &self,
        venv: &VirtualEnvironment,
        link_name: Option<&str>,
        options: LinkOptions,
    ) -> Result<LinkOutcome> {
        match self.create_link(venv, link_name, options) {
            Err(WorkonError::LinkAlreadyExists { link, .. }) => {
                let target = self.link_target(venv, options.resolve)?;
                if options.dry_run {
                    ensure_symlink(&link)?;
                } else {
                    self.remove_link(&link)?;
                    make_symlink(&target, &link)?;
                    info!("Recreate symlink {} -> {}", link.display(), target.display());
                }
                Ok(self.outcome(&link, &target, LinkAction::Replaced))
            }
            other => other,
        }
    }

    /// Remove the symlink at `link`. Never removes a real file or directory.
    pub fn remove_link(&self, link: &Path) -> Result<()> {
        ensure_symlink(link)?;
        remove_symlink(link)?;
        info!("Remove symlink {}", link.display());
        Ok(())
    }

    /// Remove the entry called `name`.
    pub fn remove(&self, name: &str) -> Result<ManagedLink> {
        let path = self.link_path(name)?;
        ensure_symlink(&path)?;
        let link = ManagedLink::classify(&path)?;
        self.remove_link(&path)?;
        Ok(link)
    }

    /// Remove every broken link.
    ///
    /// Returns the links removed, or in dry-run mode the links that would
    /// be removed. A link that fails to unlink is logged and left out.
    pub fn clean(&self, dry_run: bool) -> Result<Vec<ManagedLink>> {
        let invalid = self.find_invalid_links()?;
        if dry_run {
            for link in &invalid {
                info!("Would remove symlink {}", link.link_path.display());
            }
            return Ok(invalid);
        }

        let mut removed = Vec::with_capacity(invalid.len());
        for link in invalid {
            match self.remove_link(&link.link_path) {
                Ok(()) => removed.push(link),
                Err(e) => warn!("Failed to remove {}: {}", link.link_path.display(), e),
            }
        }
        Ok(removed)
    }

    fn link_target(&self, venv: &VirtualEnvironment, resolve: bool) -> Result<PathBuf> {
        if resolve {
            return Ok(venv.path().canonicalize()?);
        }

        let home = self.home.canonicalize()?;
        let venv_path = std::path::absolute(venv.path())?;
        let venv_path = match (venv_path.parent(), venv_path.file_name()) {
            (Some(parent), Some(name)) => parent.canonicalize()?.join(name),
            _ => venv_path,
        };
        Ok(relative_path(&home, &venv_path))
    }

    fn existing_conflict(
        &self,
        link: &Path,
        target: &Path,
        venv: &VirtualEnvironment,
    ) -> Result<Existing> {
        let meta = match fs::symlink_metadata(link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Existing::None),
            Err(e) => return Err(e.into()),
        };

        if !meta.file_type().is_symlink() {
            return Ok(Existing::Different(format!(
                "an existing {}",
                if meta.is_dir() { "directory" } else { "file" }
            )));
        }

        let existing = fs::read_link(link)?;
        if existing == target {
            return Ok(Existing::Same);
        }

        let same_place = match (link.canonicalize(), venv.path().canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same_place {
            Ok(Existing::Same)
        } else {
            Ok(Existing::Different(existing.display().to_string()))
        }
    }

    fn outcome(&self, link: &Path, target: &Path, action: LinkAction) -> LinkOutcome {
        LinkOutcome {
            link: ManagedLink {
                name: link
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                link_path: link.to_path_buf(),
                target: Some(target.to_path_buf()),
                status: LinkStatus::Valid,
            },
            action,
        }
    }
}

enum Existing {
    None,
    Same,
    Different(String),
}

/// Lazy iterator over home directory entries.
pub struct Links {
    entries: Option<fs::ReadDir>,
}

impl Iterator for Links {
    type Item = Result<ManagedLink>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.as_mut()?.next()?;
        Some(
            entry
                .map_err(WorkonError::from)
                .and_then(|e| ManagedLink::classify(&e.path())),
        )
    }
}

fn ensure_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(()),
        Ok(_) => Err(WorkonError::NotASymlink {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(WorkonError::PathNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_symlink(link: &Path) -> std::io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_symlink(link: &Path) -> std::io::Result<()> {
    fs::remove_dir(link).or_else(|_| fs::remove_file(link))
}

/// Lexical path from directory `from` to `to`. Both must be absolute.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}
