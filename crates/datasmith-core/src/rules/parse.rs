//! # Rule Normalization
//!
//! Turns raw [`ColumnSpec`] / [`AppendSpec`] records into the normalized rule
//! model. All structural validation happens here, once, before any value is
//! generated:
//!
//! - each source kind has the parameters it needs;
//! - weight and option lists line up;
//! - every referenced position points at a strictly earlier column (the
//!   model only supports backward dependencies, so declared order is a valid
//!   evaluation order and no cycle can exist);
//! - column names are unique.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{DatasmithError, Result};
use crate::generate::text::TextMethod;
use crate::generate::value::{parse_float, parse_integer};
use crate::rules::spec::{AppendSpec, ColumnSpec};
use crate::rules::types::*;

impl RuleSet {
    /// Normalize and validate an ordered list of column specs.
    pub fn build(specs: &[ColumnSpec]) -> Result<Self> {
        let mut rules = Vec::with_capacity(specs.len());
        let mut seen = HashSet::new();

        for (idx, spec) in specs.iter().enumerate() {
            let rule = ColumnRule::build(idx + 1, spec)?;
            if !seen.insert(rule.name.clone()) {
                return Err(DatasmithError::DuplicateColumn { column: rule.name });
            }
            rules.push(rule);
        }

        debug!(
            "Built rule set: {} columns ({} dependent)",
            rules.len(),
            rules.iter().filter(|r| r.source.is_dependent()).count()
        );

        Ok(Self { rules })
    }
}

impl ColumnRule {
    /// Normalize one spec sitting at the given 1-based position.
    pub fn build(position: usize, spec: &ColumnSpec) -> Result<Self> {
        let ctx = RuleContext {
            column: spec.name.trim(),
            position,
        };
        if ctx.column.is_empty() {
            return Err(ctx.malformed("column name is empty"));
        }

        let source = match spec.data.trim().to_ascii_lowercase().as_str() {
            "company" | "row_index" => Source::RowIndex,
            "random" => {
                let (options, weights) = ctx.options_and_weights(&spec.options, &spec.weights)?;
                Source::Random { options, weights }
            }
            "faker" | "sequential_text" => Source::Text {
                method: TextMethod::from_name(spec.faker_method.as_deref().unwrap_or("name")),
            },
            "increment" => Source::Increment {
                start: ctx.optional_integer("start", spec.start.as_deref(), 1)?,
                step: ctx.optional_integer("interval", spec.interval.as_deref(), 1)?,
            },
            "reference" => {
                let column = ctx.reference(spec.cols)?;
                let keys = ctx.list("value", &spec.value)?.to_vec();
                let outputs = ctx.list("range", &spec.range)?.to_vec();
                ctx.warn_unpaired("value", keys.len(), "range", outputs.len());
                Source::Reference {
                    column,
                    keys,
                    outputs,
                }
            }
            "reference_range" => {
                let column = ctx.reference(spec.cols)?;
                let thresholds = ctx
                    .list("range", &spec.range)?
                    .iter()
                    .map(|t| ctx.integer("range", t))
                    .collect::<Result<Vec<_>>>()?;
                let outputs = ctx.list("value", &spec.value)?.to_vec();
                ctx.warn_unpaired("range", thresholds.len(), "value", outputs.len());
                Source::ReferenceRange {
                    column,
                    thresholds,
                    outputs,
                }
            }
            "reference_boolean" => {
                let column = ctx.reference(spec.cols)?;
                let condition = ctx.condition(spec.condition.as_deref())?;
                match ctx.list("value", &spec.value)? {
                    [when_true, when_false] => Source::ReferenceBoolean {
                        column,
                        condition,
                        when_true: when_true.clone(),
                        when_false: when_false.clone(),
                    },
                    other => {
                        return Err(ctx.malformed(format!(
                            "reference_boolean needs exactly two values (true, false), got {}",
                            other.len()
                        )))
                    }
                }
            }
            "reference_boolean2" => Source::ReferenceBooleanRandom {
                column: ctx.reference(spec.cols)?,
                condition: ctx.condition(spec.condition.as_deref())?,
                values: ctx.list("value", &spec.value)?.to_vec(),
            },
            "total" | "aggregate" => {
                let operator = ctx.operator(spec.operation.as_deref())?;
                let operands = ctx
                    .list("operands", &spec.operands)?
                    .iter()
                    .map(|token| ctx.operand(token))
                    .collect::<Result<Vec<_>>>()?;
                Source::Aggregate { operator, operands }
            }
            "discount" => {
                let column = ctx.reference(spec.cols)?;
                let sign = match spec.operation.as_deref().map(str::trim) {
                    Some("-") => Sign::Minus,
                    Some("+") => Sign::Plus,
                    Some(other) => {
                        return Err(ctx.malformed(format!(
                            "discount operation must be '+' or '-', got '{}'",
                            other
                        )))
                    }
                    None => return Err(ctx.malformed("discount requires 'operation' ('+' or '-')")),
                };
                let percent_text = &ctx.list("value", &spec.value)?[0];
                let percent = parse_float(percent_text).ok_or_else(|| {
                    ctx.malformed(format!("discount percent '{}' is not a number", percent_text))
                })?;
                Source::Discount {
                    column,
                    percent,
                    sign,
                }
            }
            other => {
                return Err(ctx.malformed(format!(
                    "unknown data source '{}'. Supported: company, random, faker, increment, \
                     reference, reference_range, reference_boolean, reference_boolean2, total, discount",
                    other
                )))
            }
        };

        Ok(Self {
            name: ctx.column.to_string(),
            position,
            dtype: DataType::from_dtype(&spec.dtype),
            source,
        })
    }
}

impl AppendRule {
    /// Normalize the append spec at the given 1-based position.
    pub fn build(position: usize, spec: &AppendSpec) -> Result<Self> {
        let malformed = |message: String| DatasmithError::MalformedAppend { position, message };

        match spec.operation.trim().to_ascii_lowercase().as_str() {
            "replace" | "overwrite" => {
                let column = spec
                    .cols
                    .ok_or_else(|| malformed("replace requires 'cols' (target column)".into()))?;
                let find = spec
                    .find
                    .clone()
                    .ok_or_else(|| malformed("replace requires 'find'".into()))?;
                let replace = spec
                    .replace
                    .clone()
                    .ok_or_else(|| malformed("replace requires 'replace'".into()))?;
                let rename = spec
                    .col_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                Ok(AppendRule::Overwrite {
                    column,
                    rename,
                    find,
                    replace,
                })
            }
            "generate" => {
                if !(0.0..=1.0).contains(&spec.nullable) {
                    return Err(malformed(format!(
                        "nullable must be between 0 and 1, got {}",
                        spec.nullable
                    )));
                }
                let name = spec
                    .new_col
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("generated_a{}", position));

                let source = match spec.data.as_deref().map(str::trim).unwrap_or("random") {
                    "random" => {
                        let options = spec
                            .options
                            .clone()
                            .filter(|o| !o.is_empty())
                            .ok_or_else(|| malformed("random generate requires 'options'".into()))?;
                        if let Some(ref weights) = spec.weights {
                            if weights.len() != options.len() {
                                return Err(malformed(format!(
                                    "weights has {} entries but options has {} entries",
                                    weights.len(),
                                    options.len()
                                )));
                            }
                        }
                        AppendSource::Random {
                            options,
                            weights: spec.weights.clone(),
                        }
                    }
                    "faker" | "sequential_text" => AppendSource::Text {
                        method: TextMethod::from_name(
                            spec.faker_method.as_deref().unwrap_or("name"),
                        ),
                    },
                    _ => AppendSource::Null,
                };

                Ok(AppendRule::Generate {
                    name,
                    source,
                    nullable: spec.nullable,
                })
            }
            other => Err(malformed(format!(
                "unknown operation '{}'. Supported: replace, generate",
                other
            ))),
        }
    }

    /// Normalize a whole list of append specs, in order.
    pub fn build_all(specs: &[AppendSpec]) -> Result<Vec<Self>> {
        specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| Self::build(idx + 1, spec))
            .collect()
    }
}

/// Column identity carried through normalization for error messages.
struct RuleContext<'a> {
    column: &'a str,
    position: usize,
}

impl RuleContext<'_> {
    fn malformed(&self, message: impl Into<String>) -> DatasmithError {
        DatasmithError::malformed(self.column, self.position, message)
    }

    /// A required, non-empty list parameter.
    fn list<'s>(&self, field: &str, list: &'s Option<Vec<String>>) -> Result<&'s [String]> {
        match list.as_deref() {
            Some(items) if !items.is_empty() => Ok(items),
            _ => Err(self.malformed(format!("missing required '{}' list", field))),
        }
    }

    fn options_and_weights(
        &self,
        options: &Option<Vec<String>>,
        weights: &Option<Vec<u32>>,
    ) -> Result<(Vec<String>, Option<Vec<u32>>)> {
        let options = self.list("options", options)?.to_vec();
        if let Some(w) = weights {
            if w.len() != options.len() {
                return Err(self.malformed(format!(
                    "weights has {} entries but options has {} entries. \
                     They must be the same length.",
                    w.len(),
                    options.len()
                )));
            }
        }
        Ok((options, weights.clone()))
    }

    /// Validate a 1-based reference to an earlier column.
    fn reference(&self, cols: Option<usize>) -> Result<usize> {
        let reference =
            cols.ok_or_else(|| self.malformed("missing required 'cols' (referenced column)"))?;
        self.earlier(reference)
    }

    fn earlier(&self, reference: usize) -> Result<usize> {
        if reference == 0 || reference >= self.position {
            return Err(DatasmithError::ForwardReference {
                column: self.column.to_string(),
                position: self.position,
                reference,
            });
        }
        Ok(reference)
    }

    /// Parse an operand token (`c8`, `C8` or `8`) into an earlier position.
    fn operand(&self, token: &str) -> Result<usize> {
        let trimmed = token.trim();
        let digits = trimmed
            .strip_prefix('c')
            .or_else(|| trimmed.strip_prefix('C'))
            .unwrap_or(trimmed);
        let reference = digits
            .parse::<usize>()
            .map_err(|_| self.malformed(format!("operand '{}' is not a column index", token)))?;
        self.earlier(reference)
    }

    fn operator(&self, operation: Option<&str>) -> Result<Operator> {
        match operation.map(str::trim) {
            Some("+") => Ok(Operator::Sum),
            Some("*") => Ok(Operator::Product),
            Some(op @ ("-" | "/")) => Err(DatasmithError::UnsupportedOperator {
                column: self.column.to_string(),
                position: self.position,
                operator: op.to_string(),
            }),
            Some(other) => Err(self.malformed(format!("unknown aggregate operator '{}'", other))),
            None => Err(self.malformed("aggregate requires 'operation' ('+' or '*')")),
        }
    }

    fn integer(&self, field: &str, text: &str) -> Result<i64> {
        parse_integer(text)
            .ok_or_else(|| self.malformed(format!("'{}' entry '{}' is not an integer", field, text)))
    }

    fn optional_integer(&self, field: &str, text: Option<&str>, default: i64) -> Result<i64> {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => self.integer(field, t),
            None => Ok(default),
        }
    }

    /// Keys pair with outputs positionally and the last output doubles as
    /// the fallback. Entries left without a partner are never used.
    fn warn_unpaired(&self, keys_field: &str, keys: usize, outputs_field: &str, outputs: usize) {
        let dropped = unpaired_entries(keys, outputs);
        if dropped > 0 {
            warn!(
                "Column '{}' (position {}): '{}' has {} entries and '{}' has {}; \
                 {} unpaired entries will be ignored",
                self.column, self.position, keys_field, keys, outputs_field, outputs, dropped
            );
        }
    }

    fn condition(&self, condition: Option<&str>) -> Result<i64> {
        let text = condition.ok_or_else(|| self.malformed("missing required 'condition'"))?;
        self.integer("condition", text)
    }
}

/// Entries of a key/output pairing that no lookup can reach. One extra
/// output is the fallback and counts as used.
fn unpaired_entries(keys: usize, outputs: usize) -> usize {
    if keys > outputs {
        keys - outputs
    } else {
        outputs.saturating_sub(keys + 1)
    }
}
