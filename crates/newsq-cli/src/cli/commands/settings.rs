//! `newsq settings` – show or change config.toml.

use anyhow::Result;
use newsq_core::config::{self, NewsqConfig};

use crate::cli::SettingsCommand;

pub fn run_settings(mut cfg: NewsqConfig, action: SettingsCommand) -> Result<()> {
    let message = match action {
        SettingsCommand::Show => {
            println!("config:        {}", config::config_path()?.display());
            for (name, value) in describe(&cfg) {
                println!("{:<14} {}", format!("{name}:"), value);
            }
            return Ok(());
        }
        other => apply(&mut cfg, other),
    };
    config::save(&cfg)?;
    println!("{message}");
    Ok(())
}

/// Applies a change and returns the confirmation line.
fn apply(cfg: &mut NewsqConfig, action: SettingsCommand) -> String {
    match action {
        SettingsCommand::Show => String::new(),
        SettingsCommand::SetApiKey { key } => {
            let key = key.trim().to_string();
            if key.is_empty() {
                cfg.gemini_api_key = None;
                return "API key removed".to_string();
            }
            cfg.gemini_api_key = Some(key);
            "API key saved".to_string()
        }
        SettingsCommand::ClearApiKey => {
            cfg.gemini_api_key = None;
            "API key removed".to_string()
        }
        SettingsCommand::AiSummaries { state } => {
            cfg.ai_summaries = state.enabled();
            format!("AI summaries {}", on_off(cfg.ai_summaries))
        }
        SettingsCommand::StrictLocal { state } => {
            cfg.strict_local = state.enabled();
            format!("strict local search {}", on_off(cfg.strict_local))
        }
    }
}

fn describe(cfg: &NewsqConfig) -> Vec<(&'static str, String)> {
    vec![
        ("strict_local", on_off(cfg.strict_local).to_string()),
        ("ai_summaries", on_off(cfg.ai_summaries).to_string()),
        (
            "api_key",
            cfg.gemini_api_key
                .as_deref()
                .map(mask_key)
                .unwrap_or_else(|| "not set".to_string()),
        ),
        ("max_history", cfg.max_history.to_string()),
        ("max_recents", cfg.max_recents.to_string()),
    ]
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Last four characters only.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
