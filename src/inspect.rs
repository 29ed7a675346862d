//! Side-effect-free inspection pass over every component
//!
//! Probes never install or modify anything; a probe that cannot determine
//! state reports "not installed" rather than failing. The snapshot feeds
//! the status table and the pre-provision report; the engine re-probes at
//! the moment of action, so the two may diverge under concurrent external
//! modification.

use crate::config::StackConfig;
use crate::domain::{ComponentId, ComponentState, SnapshotRow, StackSnapshot, classify, short_sha};
use crate::error::Result;
use crate::host::Host;
use crate::profile;

/// Build the full snapshot in component order
pub fn snapshot(host: &mut dyn Host, config: &StackConfig) -> Result<StackSnapshot> {
    let mut rows = Vec::with_capacity(ComponentId::ALL.len());
    for component in ComponentId::ALL {
        let state = inspect_component(host, config, component)?;
        rows.push(SnapshotRow { component, state });
    }
    Ok(StackSnapshot::new(rows))
}

fn inspect_component(
    host: &mut dyn Host,
    config: &StackConfig,
    component: ComponentId,
) -> Result<ComponentState> {
    let state = match component {
        ComponentId::BasePackages => {
            let mut present = 0;
            for package in &config.base_packages {
                if host.apt_policy(package)?.installed.is_some() {
                    present += 1;
                }
            }
            presence_set(present, config.base_packages.len())
        }
        ComponentId::Driver => {
            let policy = host.apt_policy(&config.driver_package)?;
            classify(policy.installed.as_deref(), policy.candidate.as_deref())
        }
        ComponentId::Runtime => {
            let policy = host.apt_policy(&config.runtime_package)?;
            classify(policy.installed.as_deref(), policy.candidate.as_deref())
        }
        ComponentId::UserGroups => {
            let current = host.user_groups()?;
            let member = config
                .gpu_groups
                .iter()
                .filter(|g| current.contains(g))
                .count();
            presence_set(member, config.gpu_groups.len())
        }
        ComponentId::ShellProfile => inspect_profile(config),
        ComponentId::AppCheckout => inspect_checkout(
            host,
            &config.app_repo_url,
            &config.install_root,
            &config.branch_fallback,
        ),
        ComponentId::PluginCheckout => inspect_checkout(
            host,
            &config.plugin_repo_url,
            &config.plugin_dir(),
            &config.branch_fallback,
        ),
        ComponentId::PythonEnv => {
            if host.venv_present(&config.venv_dir()) {
                ComponentState::Current {
                    version: "venv present".to_string(),
                }
            } else {
                ComponentState::NotInstalled
            }
        }
        ComponentId::TorchFramework => match host.pip_version(&config.venv_dir(), "torch")? {
            Some(version) => ComponentState::Current { version },
            None => ComponentState::NotInstalled,
        },
        ComponentId::ModelDirs => {
            let present = config
                .model_dirs
                .iter()
                .filter(|d| config.install_root.join(d).exists())
                .count();
            presence_set(present, config.model_dirs.len())
        }
        ComponentId::LaunchScripts => {
            let run = config.install_root.join(&config.run_script).exists();
            let update = config.install_root.join(&config.update_script).exists();
            presence_set(usize::from(run) + usize::from(update), 2)
        }
    };
    Ok(state)
}

/// Map "m of n present" onto the component state machine
fn presence_set(present: usize, total: usize) -> ComponentState {
    if present == 0 {
        ComponentState::NotInstalled
    } else if present == total {
        ComponentState::Current {
            version: format!("{total}/{total} present"),
        }
    } else {
        ComponentState::Stale {
            current: format!("{present}/{total} present"),
            available: format!("{total}/{total}"),
        }
    }
}

fn inspect_profile(config: &StackConfig) -> ComponentState {
    let existing = std::fs::read_to_string(&config.profile_path).unwrap_or_default();
    let has_sentinel = existing
        .lines()
        .any(|line| line.trim() == config.profile_sentinel);

    if profile::merge_exports(&existing, &config.profile_sentinel, &config.profile_exports)
        .is_none()
    {
        ComponentState::Current {
            version: "export block converged".to_string(),
        }
    } else if has_sentinel {
        ComponentState::Stale {
            current: "partial export block".to_string(),
            available: "complete export block".to_string(),
        }
    } else {
        ComponentState::NotInstalled
    }
}

fn inspect_checkout(
    host: &mut dyn Host,
    url: &str,
    dir: &std::path::Path,
    branches: &[String],
) -> ComponentState {
    // A corrupt or unreadable checkout reports as absent here; the engine
    // surfaces the underlying error if an action is actually attempted.
    let local = host.git_local_head(dir).unwrap_or(None);
    let Some(local_sha) = local else {
        return ComponentState::NotInstalled;
    };

    let remote = host.git_remote_head(url, branches).unwrap_or(None);
    match remote {
        Some((_, remote_sha)) if remote_sha != local_sha => ComponentState::Stale {
            current: short_sha(&local_sha),
            available: short_sha(&remote_sha),
        },
        _ => ComponentState::Current {
            version: short_sha(&local_sha),
        },
    }
}
