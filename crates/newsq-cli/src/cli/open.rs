//! Hand a URL to the desktop's default browser.

use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

const OPENER: &str = "xdg-open";

pub fn open_url(url: &str) -> Result<()> {
    let status = Command::new(OPENER)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("spawn {OPENER}"))?;
    if !status.success() {
        bail!("{OPENER} exited with {status}");
    }
    tracing::debug!(url, "opened in browser");
    Ok(())
}
