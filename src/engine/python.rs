//! Python environment and ML framework convergence
//!
//! The venv is created once inside the checkout and seeded from the
//! application's requirements file. Torch installs as a nightly build from
//! the ROCm wheel index; no candidate version is queryable there, so an
//! existing install is treated as current (the same silent-skip policy as
//! an empty package-manager candidate). The post-install version probe is
//! best-effort and reports "unknown" rather than failing the run.

use super::RunContext;
use crate::config::StackConfig;
use crate::domain::ComponentId;
use crate::error::Result;
use crate::host::Host;

pub fn converge_venv(ctx: &mut RunContext, host: &mut dyn Host, config: &StackConfig) -> Result<()> {
    let venv = config.venv_dir();

    if host.venv_present(&venv) {
        ctx.record_skipped(
            ComponentId::PythonEnv,
            format!("venv present at {}", venv.display()),
        );
        return Ok(());
    }

    host.venv_create(&venv)?;
    host.pip_install(
        &venv,
        &["install".to_string(), "--upgrade".to_string(), "pip".to_string()],
    )?;
    let requirements = config.install_root.join(&config.requirements_file);
    host.pip_install(
        &venv,
        &[
            "install".to_string(),
            "-r".to_string(),
            requirements.display().to_string(),
        ],
    )?;
    ctx.record_installed(
        ComponentId::PythonEnv,
        format!("venv + {}", config.requirements_file),
    );
    Ok(())
}

pub fn converge_torch(
    ctx: &mut RunContext,
    host: &mut dyn Host,
    config: &StackConfig,
) -> Result<()> {
    let venv = config.venv_dir();

    if let Some(version) = host.pip_version(&venv, "torch")? {
        ctx.record_skipped(ComponentId::TorchFramework, format!("torch {version} present"));
        return Ok(());
    }

    let mut args = vec!["install".to_string(), "--pre".to_string()];
    args.extend(config.torch_packages.iter().cloned());
    args.push("--index-url".to_string());
    args.push(config.torch_index_url.clone());
    host.pip_install(&venv, &args)?;

    // Best-effort verification; an unreadable version never fails the run
    let version = host
        .pip_version(&venv, "torch")
        .unwrap_or_default()
        .unwrap_or_else(|| "unknown".to_string());
    ctx.record_installed(ComponentId::TorchFramework, format!("torch {version}"));
    Ok(())
}
