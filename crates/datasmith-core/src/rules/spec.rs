//! Raw rule records, exactly as they come out of a rules file or a
//! structured request. Nothing here is validated: [`RuleSet::build`] turns a
//! slice of [`ColumnSpec`] into the normalized rule model, and
//! [`AppendRule::build`] does the same for [`AppendSpec`].
//!
//! List fields accept either an array or a single comma-separated string, so
//! both `options = ["a", "b"]` and `options = "a,b"` are valid.
//!
//! [`RuleSet::build`]: crate::rules::types::RuleSet::build
//! [`AppendRule::build`]: crate::rules::types::AppendRule::build

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// One `[[columns]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Column header.
    pub name: String,
    /// Declared type: `int`, `float`, `decimal` or `str`.
    pub dtype: String,
    /// Source kind (`random`, `faker`, `company`, `reference`, `total`, ...).
    pub data: String,
    #[serde(deserialize_with = "text_list")]
    pub options: Option<Vec<String>>,
    #[serde(deserialize_with = "number_list")]
    pub weights: Option<Vec<u32>>,
    /// 1-based position of the referenced column.
    pub cols: Option<usize>,
    #[serde(deserialize_with = "text_list")]
    pub value: Option<Vec<String>>,
    #[serde(deserialize_with = "text_list")]
    pub range: Option<Vec<String>>,
    #[serde(deserialize_with = "scalar_text")]
    pub condition: Option<String>,
    pub operation: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub operands: Option<Vec<String>>,
    pub faker_method: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub interval: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            dtype: "str".to_string(),
            data: "random".to_string(),
            options: None,
            weights: None,
            cols: None,
            value: None,
            range: None,
            condition: None,
            operation: None,
            operands: None,
            faker_method: None,
            start: None,
            interval: None,
        }
    }
}

impl ColumnSpec {
    /// A spec with the given header, type and source kind; every parameter unset.
    pub fn new(name: &str, dtype: &str, data: &str) -> Self {
        Self {
            name: name.to_string(),
            dtype: dtype.to_string(),
            data: data.to_string(),
            ..Self::default()
        }
    }
}

/// One `[[append]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppendSpec {
    /// `replace` (alias `overwrite`) or `generate`.
    pub operation: String,
    /// 1-based target column for `replace`.
    pub cols: Option<usize>,
    /// Optional new header for the `replace` target.
    pub col_name: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub find: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub replace: Option<String>,
    /// Header of the column added by `generate`.
    pub new_col: Option<String>,
    /// `random`, `faker`, or anything else for an all-null column.
    pub data: Option<String>,
    #[serde(deserialize_with = "text_list")]
    pub options: Option<Vec<String>>,
    #[serde(deserialize_with = "number_list")]
    pub weights: Option<Vec<u32>>,
    pub faker_method: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub nullable: f64,
}

impl Default for AppendSpec {
    fn default() -> Self {
        Self {
            operation: "replace".to_string(),
            cols: None,
            col_name: None,
            find: None,
            replace: None,
            new_col: None,
            data: None,
            options: None,
            weights: None,
            faker_method: None,
            nullable: 0.0,
        }
    }
}

/// A TOML scalar, kept as its textual form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextList {
    Items(Vec<Scalar>),
    Joined(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberList<T> {
    Items(Vec<T>),
    Joined(String),
}

/// Split a comma-separated list, trimming whitespace around each entry.
pub(crate) fn split_list(joined: &str) -> Vec<String> {
    joined.split(',').map(|p| p.trim().to_string()).collect()
}

fn text_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextList>::deserialize(deserializer)?;
    Ok(raw.map(|list| match list {
        TextList::Items(items) => items.into_iter().map(Scalar::into_text).collect(),
        TextList::Joined(joined) => split_list(&joined),
    }))
}

pub(crate) fn number_list<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    let raw = Option::<NumberList<T>>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(NumberList::Items(items)) => Ok(Some(items)),
        Some(NumberList::Joined(joined)) => split_list(&joined)
            .into_iter()
            .map(|entry| {
                entry
                    .parse::<T>()
                    .map_err(|e| D::Error::custom(format!("invalid list entry '{}': {}", entry, e)))
            })
            .collect::<std::result::Result<Vec<T>, D::Error>>()
            .map(Some),
    }
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(i) => Ok(i as f64),
        Scalar::Float(f) => Ok(f),
        Scalar::Bool(b) => Err(D::Error::custom(format!("expected a number, got {}", b))),
        Scalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid number '{}': {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_spec_accepts_arrays_and_joined_lists() {
        let toml = r#"
name = "Lead_Source"
data = "random"
options = "Website, Call,Tradeshow"
weights = [25, 25, 50]
"#;
        let spec: ColumnSpec = toml::from_str(toml).unwrap();
        assert_eq!(spec.dtype, "str");
        assert_eq!(
            spec.options.as_deref(),
            Some(&["Website".to_string(), "Call".into(), "Tradeshow".into()][..])
        );
        assert_eq!(spec.weights, Some(vec![25, 25, 50]));
    }

    #[test]
    fn test_numeric_scalars_become_text() {
        let toml = r#"
name = "Offer"
dtype = "int"
data = "reference_boolean"
cols = 5
value = [1, 0]
condition = 1
"#;
        let spec: ColumnSpec = toml::from_str(toml).unwrap();
        assert_eq!(spec.value, Some(vec!["1".to_string(), "0".to_string()]));
        assert_eq!(spec.condition.as_deref(), Some("1"));
        assert_eq!(spec.cols, Some(5));
    }

    #[test]
    fn test_joined_weights_reject_garbage() {
        let toml = r#"
name = "x"
options = "a,b"
weights = "1,many"
"#;
        let err = toml::from_str::<ColumnSpec>(toml).unwrap_err();
        assert!(err.to_string().contains("many"), "{}", err);
    }

    #[test]
    fn test_append_spec_defaults() {
        let spec: AppendSpec = toml::from_str("operation = \"generate\"\nnullable = 1").unwrap();
        assert_eq!(spec.operation, "generate");
        assert_eq!(spec.nullable, 1.0);
        assert!(spec.new_col.is_none());
    }
}
