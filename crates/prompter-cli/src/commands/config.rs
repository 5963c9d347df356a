use anyhow::{bail, Context, Result};
use tracing::info;

use prompter_core::AppConfig;

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    let content = config.to_toml().context("serializing configuration")?;
    print!("{}", content);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "{} already exists.\nUse `notch-prompter config init --force` to overwrite it.",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    println!("Wrote {}", path.display());
    Ok(())
}
