use clap::Subcommand;

use biosched_core::storage::data_dir;
use biosched_core::Config;

use super::CmdResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. bio.wake_time)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Show all config
    Show,
    /// Restore defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> CmdResult {
    match action {
        ConfigAction::Get { key } => {
            let cfg = Config::load()?;
            match cfg.get(&key) {
                Some(val) => println!("{val}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load()?;
            cfg.set(&key, &value)?;
            cfg.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::Show => {
            let cfg = Config::load()?;
            println!("{}", flatten_config(&cfg)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", data_dir()?.join("config.toml").display());
        }
    }
    Ok(())
}

fn flatten_config(cfg: &Config) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(cfg).map(|json| render(&json, ""))?)
}

/// Flatten to `dotted.key = value` lines, matching what `get`/`set` accept.
fn render(value: &serde_json::Value, prefix: &str) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                render(v, &key)
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        serde_json::Value::Null => format!("{prefix} = (unset)"),
        other => format!("{prefix} = {other}"),
    }
}
