use anyhow::{Context, Result};
use khata_core::BankIdentity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "khata.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bank: BankSection,
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BankSection {
    pub name: String,
    pub account_suffix: String,
}

impl Default for BankSection {
    fn default() -> Self {
        let bank = BankIdentity::default();
        Self {
            name: bank.name,
            account_suffix: bank.account_suffix,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub input: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            input: PathBuf::from("bank_statement.txt"),
            out_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn bank_identity(&self) -> BankIdentity {
        BankIdentity {
            name: self.bank.name.clone(),
            account_suffix: self.bank.account_suffix.clone(),
        }
    }
}

/// Load config from an explicit path (must exist), or from ./khata.toml,
/// falling back to defaults when no file is present.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}
