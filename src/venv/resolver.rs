//! Environment resolution.
//!
//! Resolves the environment a command should act on using the priority
//! chain:
//! 1. Explicit path (`--path`)
//! 2. Name of an entry in the managed home directory (`--name`)
//! 3. Default-venv search from the working directory upward
//!
//! A higher-priority input always wins, even when a lower one would also
//! resolve. Failures of an explicit path or name propagate unchanged.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, WorkonError};

use super::discover::{find_in_dir, infer_environment_path};
use super::environment::VirtualEnvironment;
use super::pattern::VenvPatterns;
use super::validate::{
    is_valid_virtual_environment, validate_is_virtual_environment, validate_link_name,
    validate_symlink,
};

/// How the environment was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Explicit `--path`.
    Path,
    /// Entry in the home directory named by `--name`.
    Name,
    /// Found by searching the working directory and its ancestors.
    DefaultVenv,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "--path"),
            Self::Name => write!(f, "--name"),
            Self::DefaultVenv => write!(f, "default venv search"),
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Explicit environment path (or a directory holding one).
    pub path: Option<PathBuf>,
    /// Name of an entry in the home directory.
    pub name: Option<String>,
    /// Working directory; relative paths and the default search start here.
    pub cwd: PathBuf,
    /// Whether to search `cwd` and its ancestors when nothing else is given.
    pub default_venv: bool,
    /// Canonicalize symlinks in the result.
    pub resolve: bool,
    /// Maximum number of ancestors above `cwd` to search. `None` searches up
    /// to the filesystem root.
    pub max_depth: Option<usize>,
}

impl ResolutionRequest {
    /// A request with no explicit inputs and default-venv search enabled.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            path: None,
            name: None,
            cwd: cwd.into(),
            default_venv: true,
            resolve: false,
            max_depth: None,
        }
    }

    /// Set the explicit path.
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    /// Set the home-directory name.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Enable or disable the default-venv search.
    pub fn with_default_venv(mut self, enabled: bool) -> Self {
        self.default_venv = enabled;
        self
    }

    /// Enable or disable symlink canonicalization.
    pub fn with_resolve(mut self, resolve: bool) -> Self {
        self.resolve = resolve;
        self
    }

    /// Limit the ancestor search.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A resolved environment and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The environment.
    pub venv: VirtualEnvironment,
    /// Which strategy produced it.
    pub source: ResolutionSource,
}

/// Resolves requests against one home directory and pattern set.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    home: PathBuf,
    patterns: VenvPatterns,
}

impl EnvironmentResolver {
    /// Create a resolver from a compiled pattern set.
    pub fn new(home: impl Into<PathBuf>, patterns: VenvPatterns) -> Self {
        Self {
            home: home.into(),
            patterns,
        }
    }

    /// Create a resolver from raw patterns.
    ///
    /// An empty set fails with [`WorkonError::EmptyPatternSet`] before any
    /// filesystem access.
    pub fn from_patterns<S: AsRef<str>>(home: impl Into<PathBuf>, patterns: &[S]) -> Result<Self> {
        Ok(Self::new(home, VenvPatterns::new(patterns)?))
    }

    /// The managed home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The pattern set.
    pub fn patterns(&self) -> &VenvPatterns {
        &self.patterns
    }

    /// Resolve a request to an environment.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use workon::venv::{EnvironmentResolver, ResolutionRequest};
    ///
    /// let resolver = EnvironmentResolver::from_patterns("/home/me/.virtualenvs", &[".venv"])?;
    /// let request = ResolutionRequest::new("/home/me/src/project").with_name(Some("project".into()));
    /// let venv = resolver.resolve(&request)?;
    /// println!("{}", venv.path().display());
    /// # Ok::<(), workon::WorkonError>(())
    /// ```
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<VirtualEnvironment> {
        self.resolve_with_source(request).map(|r| r.venv)
    }

    /// Resolve a request, also reporting which strategy matched.
    pub fn resolve_with_source(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let cwd = absolute(&request.cwd)?;

        // 1. Explicit path
        if let Some(path) = &request.path {
            let venv = self.from_path(&cwd.join(path), request.resolve)?;
            debug!("Resolved {} via --path", venv.path().display());
            return Ok(Resolution {
                venv,
                source: ResolutionSource::Path,
            });
        }

        // 2. Name in the home directory
        if let Some(name) = &request.name {
            let venv = self.from_name(name, request.resolve)?;
            debug!("Resolved {} via --name {}", venv.path().display(), name);
            return Ok(Resolution {
                venv,
                source: ResolutionSource::Name,
            });
        }

        // 3. Default venv search
        let mut attempted = vec!["--path (not given)".to_string(), "--name (not given)".to_string()];
        if request.default_venv {
            if let Some(path) = self.search_ancestors(&cwd, request.max_depth) {
                let path = if request.resolve {
                    canonicalize(&path)?
                } else {
                    path
                };
                let venv = VirtualEnvironment::new(path, &self.patterns)?;
                debug!("Resolved {} via default venv search", venv.path().display());
                return Ok(Resolution {
                    venv,
                    source: ResolutionSource::DefaultVenv,
                });
            }
            attempted.push(format!("default venv search from {}", cwd.display()));
        } else {
            attempted.push("default venv search (disabled)".to_string());
        }

        // 4. Nothing left
        Err(WorkonError::NoVirtualEnvironment { attempted })
    }

    fn from_path(&self, path: &Path, resolve: bool) -> Result<VirtualEnvironment> {
        let path = if resolve {
            canonicalize(path)?
        } else {
            path.to_path_buf()
        };

        match infer_environment_path(&path, &self.patterns) {
            Some(found) => {
                let found = if resolve { canonicalize(&found)? } else { found };
                VirtualEnvironment::new(found, &self.patterns)
            }
            None => {
                validate_is_virtual_environment(&path)?;
                Err(WorkonError::NotAVirtualEnvironment { path })
            }
        }
    }

    fn from_name(&self, name: &str, resolve: bool) -> Result<VirtualEnvironment> {
        validate_link_name(name)?;
        let link = self.home.join(name);
        match fs::symlink_metadata(&link) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WorkonError::PathNotFound { path: link });
            }
            Err(e) => return Err(e.into()),
        }

        match validate_symlink(&link) {
            // Real directories in the home still resolve by name.
            Ok(()) | Err(WorkonError::NotASymlink { .. }) => {}
            Err(e) => return Err(e),
        }

        let path = if resolve { canonicalize(&link)? } else { link };
        Ok(VirtualEnvironment::new(path, &self.patterns)?.with_name(name))
    }

    /// Nearest environment in `cwd` or one of its ancestors.
    ///
    /// Within one directory, a pattern-named directory that is itself the
    /// environment (the caller is inside `.venv/`) wins over its children.
    fn search_ancestors(&self, cwd: &Path, max_depth: Option<usize>) -> Option<PathBuf> {
        for (depth, dir) in cwd.ancestors().enumerate() {
            if max_depth.is_some_and(|max| depth > max) {
                debug!("Stopping default venv search at depth limit {}", depth - 1);
                break;
            }

            let own_name_matches = dir
                .file_name()
                .is_some_and(|n| self.patterns.matches(&n.to_string_lossy()));
            if own_name_matches && is_valid_virtual_environment(dir) {
                return Some(dir.to_path_buf());
            }

            if let Some(found) = find_in_dir(dir, &self.patterns) {
                return Some(found);
            }
        }
        None
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| match e.kind() {
        ErrorKind::NotFound => WorkonError::PathNotFound {
            path: path.to_path_buf(),
        },
        _ => e.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::validate::fixtures::{make_venv, symlink};
    use tempfile::TempDir;

    fn resolver(home: &Path) -> EnvironmentResolver {
        EnvironmentResolver::from_patterns(home, &[".venv", "venv"]).unwrap()
    }

    struct Fixture {
        temp: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("home")).unwrap();
            Self { temp }
        }

        fn root(&self) -> &Path {
            self.temp.path()
        }

        fn home(&self) -> PathBuf {
            self.root().join("home")
        }
    }

    #[test]
    fn explicit_path_resolves() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("proj/.venv"));
        let request = ResolutionRequest::new(fx.root()).with_path(Some(venv.clone()));

        let resolution = resolver(&fx.home()).resolve_with_source(&request).unwrap();
        assert_eq!(resolution.venv.path(), venv);
        assert_eq!(resolution.source, ResolutionSource::Path);
    }

    #[test]
    fn explicit_path_may_be_project_dir() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("proj/.venv"));
        let request =
            ResolutionRequest::new(fx.root()).with_path(Some(fx.root().join("proj")));

        let resolved = resolver(&fx.home()).resolve(&request).unwrap();
        assert_eq!(resolved.path(), venv);
        assert_eq!(resolved.name(), "proj");
    }

    #[test]
    fn relative_path_joins_cwd() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("proj/.venv"));
        let request = ResolutionRequest::new(fx.root().join("proj"))
            .with_path(Some(PathBuf::from(".venv")));

        let resolved = resolver(&fx.home()).resolve(&request).unwrap();
        assert_eq!(resolved.path(), venv);
    }

    #[test]
    fn path_overrides_name() {
        let fx = Fixture::new();
        let by_path = make_venv(&fx.root().join("a/.venv"));
        let by_name = make_venv(&fx.root().join("b/.venv"));
        symlink(&by_name, &fx.home().join("b"));

        let r = resolver(&fx.home());
        let both = ResolutionRequest::new(fx.root())
            .with_path(Some(by_path.clone()))
            .with_name(Some("b".into()));
        let path_only = ResolutionRequest::new(fx.root()).with_path(Some(by_path));

        assert_eq!(r.resolve(&both).unwrap(), r.resolve(&path_only).unwrap());
    }

    #[test]
    fn name_overrides_default_venv() {
        let fx = Fixture::new();
        make_venv(&fx.root().join("cwd/.venv"));
        let named = make_venv(&fx.root().join("named/.venv"));
        symlink(&named, &fx.home().join("named"));

        let request = ResolutionRequest::new(fx.root().join("cwd")).with_name(Some("named".into()));
        let resolution = resolver(&fx.home()).resolve_with_source(&request).unwrap();
        assert_eq!(resolution.venv.name(), "named");
        assert_eq!(resolution.source, ResolutionSource::Name);
    }

    #[test]
    fn invalid_explicit_path_fails() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.root().join("plain")).unwrap();
        let request =
            ResolutionRequest::new(fx.root()).with_path(Some(fx.root().join("plain")));
        let err = resolver(&fx.home()).resolve(&request).unwrap_err();
        assert!(matches!(err, WorkonError::NotAVirtualEnvironment { .. }));
    }

    #[test]
    fn missing_explicit_path_fails() {
        let fx = Fixture::new();
        let request =
            ResolutionRequest::new(fx.root()).with_path(Some(fx.root().join("gone")));
        let err = resolver(&fx.home()).resolve(&request).unwrap_err();
        assert!(matches!(err, WorkonError::PathNotFound { .. }));
    }

    #[test]
    fn resolve_flag_canonicalizes_name() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("proj/.venv"));
        symlink(&venv, &fx.home().join("proj"));

        let request = ResolutionRequest::new(fx.root())
            .with_name(Some("proj".into()))
            .with_resolve(true);
        let resolved = resolver(&fx.home()).resolve(&request).unwrap();
        assert_eq!(resolved.path(), venv.canonicalize().unwrap());

        let unresolved = ResolutionRequest::new(fx.root()).with_name(Some("proj".into()));
        let resolved = resolver(&fx.home()).resolve(&unresolved).unwrap();
        assert_eq!(resolved.path(), fx.home().join("proj"));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let fx = Fixture::new();
        let request = ResolutionRequest::new(fx.root()).with_name(Some("nope".into()));
        let err = resolver(&fx.home()).resolve(&request).unwrap_err();
        assert!(matches!(err, WorkonError::PathNotFound { .. }));
    }

    #[test]
    fn broken_name_is_reported() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("foo/.venv"));
        symlink(&venv, &fx.home().join("foo"));
        fs::remove_dir_all(&venv).unwrap();

        let request = ResolutionRequest::new(fx.root()).with_name(Some("foo".into()));
        let err = resolver(&fx.home()).resolve(&request).unwrap_err();
        assert!(matches!(err, WorkonError::BrokenSymlink { .. }));
    }

    #[test]
    fn default_venv_finds_nearest_ancestor() {
        let fx = Fixture::new();
        let cwd = fx.root().join("a/b/c");
        fs::create_dir_all(&cwd).unwrap();
        let expected = make_venv(&fx.root().join("a/b/.venv"));
        make_venv(&fx.root().join("a/.venv"));

        let r = EnvironmentResolver::from_patterns(fx.home(), &[".venv"]).unwrap();
        let resolution = r.resolve_with_source(&ResolutionRequest::new(&cwd)).unwrap();
        assert_eq!(resolution.venv.path(), expected);
        assert_eq!(resolution.source, ResolutionSource::DefaultVenv);
    }

    #[test]
    fn default_venv_prefers_cwd_over_ancestor() {
        let fx = Fixture::new();
        let cwd = fx.root().join("a/b");
        let near = make_venv(&cwd.join("venv"));
        make_venv(&fx.root().join("a/.venv"));

        let resolved = resolver(&fx.home())
            .resolve(&ResolutionRequest::new(&cwd))
            .unwrap();
        assert_eq!(resolved.path(), near);
    }

    #[test]
    fn default_venv_from_inside_environment() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.root().join("proj/.venv"));

        let resolved = resolver(&fx.home())
            .resolve(&ResolutionRequest::new(venv.join("bin")))
            .unwrap();
        assert_eq!(resolved.path(), venv);
    }

    #[test]
    fn default_venv_respects_depth_limit() {
        let fx = Fixture::new();
        let cwd = fx.root().join("a/b/c");
        fs::create_dir_all(&cwd).unwrap();
        make_venv(&fx.root().join("a/.venv"));

        let r = resolver(&fx.home());
        let limited = ResolutionRequest::new(&cwd).with_max_depth(Some(1));
        assert!(matches!(
            r.resolve(&limited),
            Err(WorkonError::NoVirtualEnvironment { .. })
        ));

        let enough = ResolutionRequest::new(&cwd).with_max_depth(Some(2));
        assert!(r.resolve(&enough).is_ok());
    }

    #[test]
    fn disabled_default_venv_reports_attempts() {
        let fx = Fixture::new();
        make_venv(&fx.root().join(".venv"));

        let request = ResolutionRequest::new(fx.root()).with_default_venv(false);
        match resolver(&fx.home()).resolve(&request) {
            Err(WorkonError::NoVirtualEnvironment { attempted }) => {
                assert!(attempted.iter().any(|a| a.contains("disabled")));
            }
            other => panic!("expected NoVirtualEnvironment, got {:?}", other),
        }
    }

    #[test]
    fn empty_patterns_fail_before_filesystem_access() {
        let err = EnvironmentResolver::from_patterns::<&str>("/definitely/not/here", &[])
            .unwrap_err();
        assert!(matches!(err, WorkonError::EmptyPatternSet));
    }

    #[test]
    fn name_cannot_leave_home() {
        let fx = Fixture::new();
        make_venv(&fx.root().join("proj/.venv"));

        for name in ["../proj/.venv", "proj/.venv"] {
            let request = ResolutionRequest::new(fx.root()).with_name(Some(name.into()));
            let err = resolver(&fx.home()).resolve(&request).unwrap_err();
            assert!(matches!(err, WorkonError::InvalidLinkName { .. }), "{}", name);
        }
    }

    #[test]
    fn environment_stored_in_home_resolves_by_name() {
        let fx = Fixture::new();
        let venv = make_venv(&fx.home().join("inplace"));

        let request = ResolutionRequest::new(fx.root()).with_name(Some("inplace".into()));
        let resolved = resolver(&fx.home()).resolve(&request).unwrap();
        assert_eq!(resolved.path(), venv);
        assert_eq!(resolved.name(), "inplace");
    }
}
