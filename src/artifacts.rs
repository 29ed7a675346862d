//! Generated launch/update scripts and the model directory layout
//!
//! Scripts are a deterministic rendering of [`StackConfig`] values and are
//! rewritten unconditionally every run; overwriting with identical content
//! is the idempotency mechanism. Directories use check-then-create because
//! recreating a populated directory would be destructive.

use std::path::Path;

use crate::config::StackConfig;
use crate::error::{Result, RocstrapError};

/// Render the launch script
pub fn render_run_script(config: &StackConfig) -> String {
    let root = config.install_root.display();
    let venv = config.venv_subdir.as_str();
    let args = if config.app_args.is_empty() {
        String::new()
    } else {
        format!(" {}", config.app_args.join(" "))
    };
    format!(
        "#!/usr/bin/env bash\n\
         # Generated by rocstrap; edits will be overwritten on the next run.\n\
         set -euo pipefail\n\
         cd \"{root}\"\n\
         source \"{venv}/bin/activate\"\n\
         exec python main.py{args}\n"
    )
}

/// Render the update script
pub fn render_update_script(config: &StackConfig) -> String {
    let root = config.install_root.display();
    let venv = config.venv_subdir.as_str();
    let requirements = config.requirements_file.as_str();
    let plugin = config.plugin_subdir.as_str();
    format!(
        "#!/usr/bin/env bash\n\
         # Generated by rocstrap; edits will be overwritten on the next run.\n\
         set -euo pipefail\n\
         cd \"{root}\"\n\
         git pull --ff-only\n\
         source \"{venv}/bin/activate\"\n\
         pip install -r \"{requirements}\"\n\
         if [ -d \"{plugin}\" ]; then\n\
         \x20\x20git -C \"{plugin}\" pull --ff-only\n\
         fi\n"
    )
}

/// Write a script and mark it executable
pub fn write_executable(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| RocstrapError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
            RocstrapError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(())
}

/// Write both generated scripts under the install root
pub fn write_scripts(config: &StackConfig) -> Result<()> {
    write_executable(
        &config.install_root.join(&config.run_script),
        &render_run_script(config),
    )?;
    write_executable(
        &config.install_root.join(&config.update_script),
        &render_update_script(config),
    )
}

/// Create missing model directories under the install root.
///
/// Returns whether the whole set was absent beforehand and how many
/// directories were created; a partially present set never counts as a
/// fresh install.
pub fn create_model_dirs(root: &Path, dirs: &[String]) -> Result<(bool, usize)> {
    let all_missing = dirs.iter().all(|d| !root.join(d).exists());
    let mut created = 0;

    for dir in dirs {
        let path = root.join(dir);
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| RocstrapError::FileWriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            created += 1;
        }
    }

    Ok((all_missing, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackConfig;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> StackConfig {
        let mut config = StackConfig::defaults(Path::new("/home/op"));
        config.install_root = root.to_path_buf();
        config
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = test_config(Path::new("/home/op/ComfyUI"));
        assert_eq!(render_run_script(&config), render_run_script(&config));
        assert_eq!(render_update_script(&config), render_update_script(&config));
    }

    #[test]
    fn test_run_script_content() {
        let mut config = test_config(Path::new("/home/op/ComfyUI"));
        config.app_args = vec!["--listen".to_string()];
        let script = render_run_script(&config);
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("cd \"/home/op/ComfyUI\""));
        assert!(script.contains("source \"venv/bin/activate\""));
        assert!(script.contains("exec python main.py --listen"));
    }

    #[test]
    fn test_update_script_content() {
        let script = render_update_script(&test_config(Path::new("/home/op/ComfyUI")));
        assert!(script.contains("git pull --ff-only"));
        assert!(script.contains("pip install -r \"requirements.txt\""));
        assert!(script.contains("custom_nodes/ComfyUI-Manager"));
    }

    #[test]
    fn test_write_scripts_byte_identical_across_runs() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        write_scripts(&config).unwrap();
        let run_path = temp.path().join(&config.run_script);
        let first = std::fs::read(&run_path).unwrap();

        write_scripts(&config).unwrap();
        let second = std::fs::read(&run_path).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.sh");
        write_executable(&path, "#!/bin/sh\n").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_model_dirs_fresh_set_counts_as_install() {
        let temp = TempDir::new().unwrap();
        let dirs = vec!["models/checkpoints".to_string(), "output".to_string()];
        let (all_missing, created) = create_model_dirs(temp.path(), &dirs).unwrap();
        assert!(all_missing);
        assert_eq!(created, 2);
        assert!(temp.path().join("models/checkpoints").is_dir());
    }

    #[test]
    fn test_model_dirs_partial_set_is_not_an_install() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("models/checkpoints")).unwrap();
        let dirs = vec!["models/checkpoints".to_string(), "output".to_string()];
        let (all_missing, created) = create_model_dirs(temp.path(), &dirs).unwrap();
        assert!(!all_missing);
        assert_eq!(created, 1);
    }

    #[test]
    fn test_model_dirs_existing_set_untouched() {
        let temp = TempDir::new().unwrap();
        let dirs = vec!["models/checkpoints".to_string()];
        create_model_dirs(temp.path(), &dirs).unwrap();
        // Populate and converge again; the file must survive.
        std::fs::write(temp.path().join("models/checkpoints/model.safetensors"), b"x").unwrap();
        let (all_missing, created) = create_model_dirs(temp.path(), &dirs).unwrap();
        assert!(!all_missing);
        assert_eq!(created, 0);
        assert!(temp.path().join("models/checkpoints/model.safetensors").exists());
    }
}
