//! Real [`Host`] implementation backed by system commands
//!
//! Privileged operations go through sudo with inherited stdio so password
//! prompts reach the operator. Probes never mutate and treat an unusable
//! probe as "absent" rather than failing the run.

use std::path::Path;

use super::{Host, OsRelease, PkgPolicy, apt, exec, git, os};
use crate::error::{Result, RocstrapError, command_failed};

pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }

    fn current_user(&self) -> String {
        std::env::var("USER")
            .ok()
            .or_else(|| exec::probe("id", &["-un"]).map(|s| s.trim().to_string()))
            .unwrap_or_else(|| "root".to_string())
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SystemHost {
    fn os_release(&mut self) -> Result<OsRelease> {
        let content = std::fs::read_to_string("/etc/os-release").unwrap_or_default();
        Ok(os::parse_os_release(&content))
    }

    fn has_amd_adapter(&mut self) -> Result<bool> {
        Ok(exec::probe("lspci", &[])
            .map(|output| os::lspci_has_amd_adapter(&output))
            .unwrap_or(false))
    }

    fn apt_refresh(&mut self) -> Result<()> {
        exec::run_sudo(&["apt-get", "update"])
    }

    fn apt_policy(&mut self, package: &str) -> Result<PkgPolicy> {
        Ok(exec::probe("apt-cache", &["policy", package])
            .map(|output| apt::parse_policy(&output))
            .unwrap_or_default())
    }

    fn apt_install(&mut self, packages: &[String]) -> Result<()> {
        let mut args = vec!["apt-get", "install", "-y"];
        args.extend(packages.iter().map(String::as_str));
        exec::run_sudo(&args).map_err(|e| RocstrapError::PackageInstallFailed {
            packages: packages.join(" "),
            reason: e.to_string(),
        })
    }

    fn apt_install_deb(&mut self, deb_path: &Path) -> Result<()> {
        let path = deb_path.display().to_string();
        exec::run_sudo(&["apt-get", "install", "-y", &path]).map_err(|e| {
            RocstrapError::PackageInstallFailed {
                packages: path,
                reason: e.to_string(),
            }
        })
    }

    fn download(&mut self, url: &str, dest: &Path) -> Result<()> {
        let dest_str = dest.display().to_string();
        exec::run("wget", &["-q", "-O", &dest_str, url])
            .map(|_| ())
            .map_err(|e| RocstrapError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn user_groups(&mut self) -> Result<Vec<String>> {
        Ok(exec::probe("id", &["-nG"])
            .map(|output| {
                output
                    .split_whitespace()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn add_user_to_groups(&mut self, groups: &[String]) -> Result<()> {
        let user = self.current_user();
        let group_list = groups.join(",");
        exec::run_sudo(&["usermod", "-aG", &group_list, &user])
    }

    fn git_local_head(&mut self, dir: &Path) -> Result<Option<String>> {
        git::local_head(dir)
    }

    fn git_remote_head(
        &mut self,
        url: &str,
        branches: &[String],
    ) -> Result<Option<(String, String)>> {
        for branch in branches {
            let git_ref = format!("refs/heads/{branch}");
            if let Some(output) = exec::probe("git", &["ls-remote", "--exit-code", url, &git_ref])
            {
                if let Some(sha) = git::parse_ls_remote_sha(&output) {
                    return Ok(Some((branch.clone(), sha)));
                }
            }
        }
        Ok(None)
    }

    fn git_clone(&mut self, url: &str, dir: &Path, branch: Option<&str>) -> Result<()> {
        let mut builder = git2::build::RepoBuilder::new();
        if let Some(branch) = branch {
            builder.branch(branch);
        }
        builder
            .clone(url, dir)
            .map(|_| ())
            .map_err(|e| git::clone_error(url, &e))
    }

    fn git_pull_ff(&mut self, dir: &Path) -> Result<()> {
        let dir_str = dir.display().to_string();
        exec::run("git", &["-C", &dir_str, "pull", "--ff-only"])
            .map(|_| ())
            .map_err(|e| RocstrapError::GitPullFailed {
                path: dir_str,
                reason: e.to_string(),
            })
    }

    fn venv_present(&mut self, dir: &Path) -> bool {
        dir.join("bin").join("python").exists()
    }

    fn venv_create(&mut self, dir: &Path) -> Result<()> {
        let dir_str = dir.display().to_string();
        exec::run("python3", &["-m", "venv", &dir_str])
            .map(|_| ())
            .map_err(|e| RocstrapError::VenvCreateFailed {
                path: dir_str,
                reason: e.to_string(),
            })
    }

    fn pip_install(&mut self, venv: &Path, args: &[String]) -> Result<()> {
        let pip = venv.join("bin").join("pip");
        let pip_str = pip.display().to_string();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        exec::run_streaming(&pip_str, &arg_refs).map_err(|e| RocstrapError::PipFailed {
            detail: e.to_string(),
        })
    }

    fn pip_version(&mut self, venv: &Path, package: &str) -> Result<Option<String>> {
        let pip = venv.join("bin").join("pip");
        let pip_str = pip.display().to_string();
        Ok(exec::probe(&pip_str, &["show", package]).and_then(|output| parse_pip_version(&output)))
    }

    fn reboot(&mut self) -> Result<()> {
        exec::run_sudo(&["reboot"]).map_err(|e| command_failed("reboot", e.to_string()))
    }
}

/// Extract the Version field from `pip show` output
fn parse_pip_version(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
