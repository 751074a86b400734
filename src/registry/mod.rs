//! Symlink registry for the workon home directory.
//!
//! Every entry directly under the home directory is one of:
//! - a symlink to a valid virtual environment ([`LinkStatus::Valid`])
//! - a symlink whose target is gone or no longer validates ([`LinkStatus::Broken`])
//! - anything else ([`LinkStatus::Foreign`]), which the registry never touches
//!
//! # Example
//!
//! ```no_run
//! use workon::registry::SymlinkRegistry;
//!
//! let registry = SymlinkRegistry::new("/home/me/.virtualenvs");
//! for link in registry.list_sorted().unwrap() {
//!     println!("{:<25} {}", link.name, link.display_target());
//! }
//! ```

pub mod link;
pub mod store;

pub use link::{LinkStatus, ManagedLink};
pub use store::{LinkAction, LinkOptions, LinkOutcome, Links, SymlinkRegistry};
