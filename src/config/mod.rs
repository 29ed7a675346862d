//! Stack configuration
//!
//! Every package name, URL, branch list, export pair and path the
//! provisioner touches lives here as data. Defaults describe the supported
//! stack; a YAML file may override individual fields.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, RocstrapError};

/// Name of the optional override file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rocstrap.yaml";

/// One environment variable exported from the shell profile
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportVar {
    pub name: String,
    pub value: String,
}

/// Fully resolved configuration for one provisioning run
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// `ID` field expected in /etc/os-release
    pub target_os_id: String,
    /// `VERSION_ID` field expected in /etc/os-release
    pub target_os_version: String,

    /// apt prerequisites installed before anything else
    pub base_packages: Vec<String>,
    /// Bootstrap .deb that configures the vendor apt repository
    pub installer_deb_url: String,
    /// Package provided by the bootstrap .deb
    pub installer_package: String,
    /// Kernel driver package
    pub driver_package: String,
    /// Compute runtime meta package
    pub runtime_package: String,

    /// Groups the invoking user needs for GPU access
    pub gpu_groups: Vec<String>,

    /// Shell profile receiving the export block
    pub profile_path: PathBuf,
    /// Sentinel comment guarding the export block
    pub profile_sentinel: String,
    pub profile_exports: Vec<ExportVar>,

    /// Application checkout root; venv, models and scripts live under it
    pub install_root: PathBuf,
    pub app_repo_url: String,
    pub plugin_repo_url: String,
    /// Relative path of the plugin checkout under the install root
    pub plugin_subdir: String,
    /// Branch names tried in order when resolving remote HEAD
    pub branch_fallback: Vec<String>,

    /// Relative path of the virtual environment under the install root
    pub venv_subdir: String,
    pub requirements_file: String,
    pub torch_index_url: String,
    pub torch_packages: Vec<String>,

    /// Relative directories created if absent under the install root
    pub model_dirs: Vec<String>,

    pub run_script: String,
    pub update_script: String,
    /// Extra flags passed to the application by the run script
    pub app_args: Vec<String>,
}

/// Partial override deserialized from YAML; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverride {
    target_os_id: Option<String>,
    target_os_version: Option<String>,
    base_packages: Option<Vec<String>>,
    installer_deb_url: Option<String>,
    installer_package: Option<String>,
    driver_package: Option<String>,
    runtime_package: Option<String>,
    gpu_groups: Option<Vec<String>>,
    profile_path: Option<String>,
    profile_sentinel: Option<String>,
    profile_exports: Option<Vec<ExportVar>>,
    install_root: Option<String>,
    app_repo_url: Option<String>,
    plugin_repo_url: Option<String>,
    plugin_subdir: Option<String>,
    branch_fallback: Option<Vec<String>>,
    venv_subdir: Option<String>,
    requirements_file: Option<String>,
    torch_index_url: Option<String>,
    torch_packages: Option<Vec<String>>,
    model_dirs: Option<Vec<String>>,
    run_script: Option<String>,
    update_script: Option<String>,
    app_args: Option<Vec<String>>,
}

/// Expand a leading `~` against the home directory
fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else if raw == "~" {
        home.to_path_buf()
    } else {
        PathBuf::from(raw)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl StackConfig {
    /// Built-in defaults for the supported stack
    pub fn defaults(home: &Path) -> Self {
        Self {
            target_os_id: "ubuntu".to_string(),
            target_os_version: "24.04".to_string(),
            base_packages: strings(&["git", "python3-venv", "python3-pip", "wget", "pciutils"]),
            installer_deb_url: "https://repo.radeon.com/amdgpu-install/6.2.4/ubuntu/noble/amdgpu-install_6.2.60204-1_all.deb".to_string(),
            installer_package: "amdgpu-install".to_string(),
            driver_package: "amdgpu-dkms".to_string(),
            runtime_package: "rocm".to_string(),
            gpu_groups: strings(&["render", "video"]),
            profile_path: home.join(".profile"),
            profile_sentinel: "# Added by rocstrap (ROCm environment)".to_string(),
            profile_exports: vec![
                ExportVar {
                    name: "HSA_OVERRIDE_GFX_VERSION".to_string(),
                    value: "11.0.0".to_string(),
                },
                ExportVar {
                    name: "PATH".to_string(),
                    value: "$PATH:/opt/rocm/bin".to_string(),
                },
            ],
            install_root: home.join("ComfyUI"),
            app_repo_url: "https://github.com/comfyanonymous/ComfyUI.git".to_string(),
            plugin_repo_url: "https://github.com/ltdrdata/ComfyUI-Manager.git".to_string(),
            plugin_subdir: "custom_nodes/ComfyUI-Manager".to_string(),
            branch_fallback: strings(&["master", "main"]),
            venv_subdir: "venv".to_string(),
            requirements_file: "requirements.txt".to_string(),
            torch_index_url: "https://download.pytorch.org/whl/nightly/rocm6.2".to_string(),
            torch_packages: strings(&["torch", "torchvision", "torchaudio"]),
            model_dirs: strings(&[
                "models/checkpoints",
                "models/loras",
                "models/vae",
                "models/controlnet",
                "output",
            ]),
            run_script: "run_comfyui.sh".to_string(),
            update_script: "update_comfyui.sh".to_string(),
            app_args: vec![],
        }
    }

    /// Load configuration, merging an optional YAML override.
    ///
    /// An explicitly passed path must exist; the implicit `rocstrap.yaml`
    /// in the working directory is used only when present.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let home = dirs::home_dir().ok_or(RocstrapError::NoHomeDirectory)?;
        let mut config = Self::defaults(&home);

        let path = match override_path {
            Some(p) => {
                if !p.exists() {
                    return Err(RocstrapError::ConfigNotFound {
                        path: p.display().to_string(),
                    });
                }
                Some(p.to_path_buf())
            }
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                implicit.exists().then_some(implicit)
            }
        };

        if let Some(path) = path {
            let text =
                std::fs::read_to_string(&path).map_err(|e| RocstrapError::ConfigReadFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            let overrides: ConfigOverride =
                serde_yaml::from_str(&text).map_err(|e| RocstrapError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            config.apply(overrides, &home);
        }

        Ok(config)
    }

    fn apply(&mut self, o: ConfigOverride, home: &Path) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = o.$field {
                    self.$field = v;
                }
            };
        }
        take!(target_os_id);
        take!(target_os_version);
        take!(base_packages);
        take!(installer_deb_url);
        take!(installer_package);
        take!(driver_package);
        take!(runtime_package);
        take!(gpu_groups);
        take!(profile_sentinel);
        take!(profile_exports);
        take!(app_repo_url);
        take!(plugin_repo_url);
        take!(plugin_subdir);
        take!(branch_fallback);
        take!(venv_subdir);
        take!(requirements_file);
        take!(torch_index_url);
        take!(torch_packages);
        take!(model_dirs);
        take!(run_script);
        take!(update_script);
        take!(app_args);
        if let Some(raw) = o.profile_path {
            self.profile_path = expand_home(&raw, home);
        }
        if let Some(raw) = o.install_root {
            self.install_root = expand_home(&raw, home);
        }
    }

    /// Absolute path of the virtual environment
    pub fn venv_dir(&self) -> PathBuf {
        self.install_root.join(&self.venv_subdir)
    }

    /// Absolute path of the plugin checkout
    pub fn plugin_dir(&self) -> PathBuf {
        self.install_root.join(&self.plugin_subdir)
    }
}
