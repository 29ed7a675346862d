//! Host abstraction: every external collaborator behind one seam
//!
//! The convergence engine talks to the machine only through the [`Host`]
//! trait: the system package manager, git remotes, the Python toolchain,
//! group membership and privilege escalation. [`SystemHost`] is the real
//! implementation; tests script a fake.

use std::path::Path;

use crate::error::Result;

mod apt;
mod exec;
mod git;
mod os;
mod system;

pub use system::SystemHost;

/// Installed/candidate version pair reported by the package manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgPolicy {
    /// `None` when the package is not installed
    pub installed: Option<String>,
    /// `None` when the index has no candidate (or reports "(none)")
    pub candidate: Option<String>,
}

/// OS identity probed from /etc/os-release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub version_id: String,
    pub pretty_name: String,
}

pub trait Host {
    // Identity & hardware (read-only)
    fn os_release(&mut self) -> Result<OsRelease>;
    /// Whether an AMD display adapter is visible; an unusable probe
    /// (e.g. lspci absent) reports `false`, not an error.
    fn has_amd_adapter(&mut self) -> Result<bool>;

    // System package manager
    fn apt_refresh(&mut self) -> Result<()>;
    fn apt_policy(&mut self, package: &str) -> Result<PkgPolicy>;
    fn apt_install(&mut self, packages: &[String]) -> Result<()>;
    fn apt_install_deb(&mut self, deb_path: &Path) -> Result<()>;

    // Downloads
    fn download(&mut self, url: &str, dest: &Path) -> Result<()>;

    // User/group membership
    fn user_groups(&mut self) -> Result<Vec<String>>;
    fn add_user_to_groups(&mut self, groups: &[String]) -> Result<()>;

    // Version-control checkouts
    /// Local HEAD SHA of a checkout, `None` when the checkout is absent
    fn git_local_head(&mut self, dir: &Path) -> Result<Option<String>>;
    /// Remote HEAD of the first branch that resolves, as (branch, sha)
    fn git_remote_head(
        &mut self,
        url: &str,
        branches: &[String],
    ) -> Result<Option<(String, String)>>;
    fn git_clone(&mut self, url: &str, dir: &Path, branch: Option<&str>) -> Result<()>;
    fn git_pull_ff(&mut self, dir: &Path) -> Result<()>;

    // Python environment
    fn venv_present(&mut self, dir: &Path) -> bool;
    fn venv_create(&mut self, dir: &Path) -> Result<()>;
    fn pip_install(&mut self, venv: &Path, args: &[String]) -> Result<()>;
    /// Installed version of a package inside the venv; probe failures are
    /// soft and report `None`
    fn pip_version(&mut self, venv: &Path, package: &str) -> Result<Option<String>>;

    // Follow-up
    fn reboot(&mut self) -> Result<()>;
}
