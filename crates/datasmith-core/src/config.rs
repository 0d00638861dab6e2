//! # Rules File Parser
//!
//! Reads and parses `rules.toml`, the declarative description of one
//! generation run. Supports:
//!
//! - `[records]`: record count, run mode, declared column count, seed
//! - `[[columns]]`: one entry per output column, in order
//! - `[[append]]`: append-pass rules (mode 2 and up)
//! - `[reorder]`: final column order (mode 3)
//!
//! Example `rules.toml`:
//!
//! ```toml
//! [records]
//! num = 150
//! mode = 3
//! seed = 42
//!
//! [[columns]]
//! name = "Company_ID"
//! dtype = "int"
//! data = "company"
//!
//! [[columns]]
//! name = "Lead_Source"
//! data = "random"
//! options = "Website,Call,Tradeshow"
//! weights = [50, 25, 25]
//!
//! [[append]]
//! operation = "generate"
//! new_col = "City"
//! data = "faker"
//! faker_method = "city"
//! nullable = 0.1
//!
//! [reorder]
//! order = [2, 1, 3]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{DatasmithError, Result};
use crate::generate::engine::GenerationRun;
use crate::rules::spec::{number_list, AppendSpec, ColumnSpec};
use crate::rules::types::{AppendRule, ReorderSpec, RuleSet, RunMode};

/// Default rules file name.
pub const CONFIG_FILE_NAME: &str = "rules.toml";

/// Environment variable that can point at a rules file.
pub const RULES_ENV_VAR: &str = "DATASMITH_RULES";

/// Top-level rules.toml structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatasmithConfig {
    pub records: RecordsConfig,
    pub columns: Vec<ColumnSpec>,
    pub append: Vec<AppendSpec>,
    pub reorder: ReorderConfig,
}

/// `[records]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// Number of rows to generate.
    pub num: usize,
    /// 1 = generate, 2 = + append, 3 = + reorder.
    pub mode: u8,
    /// Declared column count. Only checked, never enforced.
    pub cols: Option<usize>,
    /// Fixed random seed for deterministic generation.
    pub seed: Option<u64>,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            num: 100,
            mode: 1,
            cols: None,
            seed: None,
        }
    }
}

/// `[reorder]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// 1-based positions, as an array or a comma-separated string.
    #[serde(deserialize_with = "number_list")]
    pub order: Option<Vec<usize>>,
}

/// Read, parse and validate a rules file.
pub fn read_config(path: &Path) -> Result<DatasmithConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DatasmithError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let config = parse_config(&content).map_err(|e| match e {
        DatasmithError::Config { message } => DatasmithError::Config {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })?;

    Ok(config)
}

/// Parse and validate rules from TOML text.
pub fn parse_config(content: &str) -> Result<DatasmithConfig> {
    let config: DatasmithConfig = toml::from_str(content).map_err(|e| DatasmithError::Config {
        message: format!("Failed to parse rules: {}", e),
    })?;

    // Validate semantic constraints that serde can't enforce.
    config.validate()?;

    Ok(config)
}

impl DatasmithConfig {
    /// Validate semantic constraints that serde cannot enforce.
    ///
    /// Rule-level checks (references, weights, source kinds) happen in
    /// [`RuleSet::build`]; this only covers the `[records]` section.
    pub fn validate(&self) -> Result<()> {
        if RunMode::from_level(self.records.mode).is_none() {
            return Err(DatasmithError::Config {
                message: format!(
                    "records.mode must be 1 (generate), 2 (append) or 3 (reorder), got {}",
                    self.records.mode
                ),
            });
        }
        if self.records.num == 0 {
            return Err(DatasmithError::Config {
                message: "records.num must be greater than 0".to_string(),
            });
        }
        if self.columns.is_empty() {
            return Err(DatasmithError::Config {
                message: "No [[columns]] defined. Add at least one column rule.".to_string(),
            });
        }
        Ok(())
    }

    pub fn mode(&self) -> RunMode {
        RunMode::from_level(self.records.mode).unwrap_or(RunMode::GenerateOnly)
    }

    /// Normalize every rule and assemble a [`GenerationRun`].
    ///
    /// A declared `records.cols` that disagrees with the number of column
    /// rules is logged as a warning.
    pub fn to_run(&self) -> Result<GenerationRun> {
        let rules = RuleSet::build(&self.columns)?;

        if let Some(declared) = self.records.cols {
            if declared != rules.len() {
                warn!(
                    "records.cols declares {} columns but {} column rules are defined",
                    declared,
                    rules.len()
                );
            }
        }

        Ok(GenerationRun {
            num_records: self.records.num,
            mode: self.mode(),
            rules,
            append: AppendRule::build_all(&self.append)?,
            reorder: self.reorder.order.clone().map(ReorderSpec::new),
            seed: self.records.seed,
        })
    }
}

/// The bundled sample rules file: a 17-column sales pipeline.
pub fn sample_config() -> &'static str {
    SAMPLE_CONFIG
}

const SAMPLE_CONFIG: &str = r#"# datasmith rules file
#
# mode = 1 generates records
# mode = 2 also applies [[append]] rules
# mode = 3 also applies the [reorder] order

[records]
num = 150
mode = 2
cols = 17

[[columns]]
name = "Company_ID"
dtype = "int"
data = "company"

[[columns]]
name = "Lead_Source"
dtype = "str"
data = "random"
options = "Website,Call,Tradeshow,Social Media,Conference"
weights = "25,25,25,20,30"

[[columns]]
name = "Sales_Rep"
dtype = "int"
data = "random"
options = "1,2,3,4,5,6,7,8,9,10,11,12"
weights = "8,8,8,8,8,8,8,8,8,8,8,8"

[[columns]]
name = "Region_Manager"
dtype = "int"
data = "reference_range"
cols = 3
value = "1,2,3,4"
range = "3,6,9,12"

[[columns]]
name = "Project_Selection"
dtype = "int"
data = "random"
options = "1,0"
weights = "50,50"

[[columns]]
name = "Offer_Selection"
dtype = "int"
data = "reference_boolean"
cols = 5
value = "1,0"
condition = 1

[[columns]]
name = "Product_ID"
dtype = "int"
data = "random"
options = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20"
weights = "5,5,5,5,5,5,5,5,5,5,5,5,5,5,5,5,5,5,5,5"

[[columns]]
name = "Unit_Cost"
dtype = "int"
data = "reference"
cols = 7
value = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20"
range = "300,400,530,420,300,400,330,420,300,200,330,420,300,400,530,420,300,400,330,420"

[[columns]]
name = "Quantity"
dtype = "int"
data = "reference_boolean2"
cols = 6
value = "1,2,3,4,5"
condition = 1

[[columns]]
name = "Total_Cost"
dtype = "decimal"
data = "total"
operation = "*"
operands = "c8,c9"

[[columns]]
name = "Offer_Submission"
dtype = "int"
data = "reference_boolean"
cols = 6
value = "1,0"
condition = 1

[[columns]]
name = "Submission_Price"
dtype = "decimal"
data = "discount"
operation = "-"
value = "10"
cols = 10

[[columns]]
name = "Negotiation_Price"
dtype = "decimal"
data = "discount"
operation = "+"
value = "5"
cols = 12

[[columns]]
name = "Win_Loss"
dtype = "int"
data = "reference_boolean"
cols = 11
value = "1,0"
condition = 1

[[columns]]
name = "Final_Sales_Value"
dtype = "decimal"
data = "total"
operation = "*"
operands = "c13,c14"

[[columns]]
name = "Country"
dtype = "str"
data = "random"
options = "India,Germany,Spain,Italy"
weights = "25,25,25,25"

[[columns]]
name = "Year"
dtype = "str"
data = "random"
options = "2022,2023,2024"
weights = "33,33,34"

[[append]]
operation = "replace"
cols = 7
col_name = "Product_Name"
find = "20"
replace = "Pendrive"

[reorder]
order = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17"
"#;
