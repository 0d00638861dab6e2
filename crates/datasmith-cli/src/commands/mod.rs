pub mod generate;
pub mod graph;
pub mod init;
pub mod preview;

use std::path::Path;

use anyhow::{Context, Result};
use datasmith_core::config::{read_config, DatasmithConfig};

/// Read a rules file, pointing at `datasmith init` when it is missing.
pub fn load_rules(path: &Path) -> Result<DatasmithConfig> {
    if !path.exists() {
        anyhow::bail!(
            "Rules file {} not found. Run `datasmith init` to create a sample, \
             or pass --rules / set DATASMITH_RULES.",
            path.display()
        );
    }
    read_config(path).with_context(|| format!("Failed to load rules from {}", path.display()))
}
