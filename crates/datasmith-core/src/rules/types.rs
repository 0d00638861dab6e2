use crate::generate::text::TextMethod;

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int,
    /// `float` and `decimal` both land here (two decimal places).
    Float,
    Str,
}

impl DataType {
    /// Map a `dtype` string to a type. Anything unrecognized is `Str`.
    pub fn from_dtype(dtype: &str) -> Self {
        match dtype.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => DataType::Int,
            "float" | "decimal" => DataType::Float,
            _ => DataType::Str,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
        }
    }
}

/// Operator of an aggregate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Sum,
    Product,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Sum => "+",
            Operator::Product => "*",
        }
    }
}

/// Direction of a percentage discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Where a column's values come from, with the parameters that kind needs.
///
/// Every `column` / `operands` entry is a 1-based position strictly smaller
/// than the owning rule's own position; [`RuleSet::build`] rejects anything
/// else.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// `i + 1` for row `i`.
    RowIndex,
    /// Independent draw per row from `options`, optionally weighted.
    Random {
        options: Vec<String>,
        weights: Option<Vec<u32>>,
    },
    /// Faker-backed text, one call per row.
    Text { method: TextMethod },
    /// `start + i * step` for row `i`.
    Increment { start: i64, step: i64 },
    /// Categorical remap of the referenced column's text.
    Reference {
        column: usize,
        keys: Vec<String>,
        outputs: Vec<String>,
    },
    /// Bucket the referenced integer by ascending upper bounds.
    ReferenceRange {
        column: usize,
        thresholds: Vec<i64>,
        outputs: Vec<String>,
    },
    /// Two-way gate on `referenced == condition`.
    ReferenceBoolean {
        column: usize,
        condition: i64,
        when_true: String,
        when_false: String,
    },
    /// Random draw from `values` when `referenced == condition`, else `0`.
    ReferenceBooleanRandom {
        column: usize,
        condition: i64,
        values: Vec<String>,
    },
    /// Row-wise sum or product of the operand columns.
    Aggregate {
        operator: Operator,
        operands: Vec<usize>,
    },
    /// `referenced * (1 ± percent / 100)`.
    Discount {
        column: usize,
        percent: f64,
        sign: Sign,
    },
}

impl Source {
    /// Whether this kind reads other columns (resolved in the second pass).
    pub fn is_dependent(&self) -> bool {
        !self.dependencies().is_empty()
    }

    /// 1-based positions this source reads, in declaration order.
    pub fn dependencies(&self) -> Vec<usize> {
        match self {
            Source::RowIndex
            | Source::Random { .. }
            | Source::Text { .. }
            | Source::Increment { .. } => Vec::new(),
            Source::Reference { column, .. }
            | Source::ReferenceRange { column, .. }
            | Source::ReferenceBoolean { column, .. }
            | Source::ReferenceBooleanRandom { column, .. }
            | Source::Discount { column, .. } => vec![*column],
            Source::Aggregate { operands, .. } => operands.clone(),
        }
    }

    /// Short name of the source kind, used in logs and graph labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Source::RowIndex => "row_index",
            Source::Random { .. } => "random",
            Source::Text { .. } => "sequential_text",
            Source::Increment { .. } => "increment",
            Source::Reference { .. } => "reference",
            Source::ReferenceRange { .. } => "reference_range",
            Source::ReferenceBoolean { .. } => "reference_boolean",
            Source::ReferenceBooleanRandom { .. } => "reference_boolean2",
            Source::Aggregate { .. } => "aggregate",
            Source::Discount { .. } => "discount",
        }
    }
}

/// A normalized rule for one output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRule {
    pub name: String,
    /// 1-based position in the rule list (and in the generated table).
    pub position: usize,
    pub dtype: DataType,
    pub source: Source,
}

/// The ordered, validated list of column rules for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub(crate) rules: Vec<ColumnRule>,
}

impl RuleSet {
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&ColumnRule> {
        position.checked_sub(1).and_then(|idx| self.rules.get(idx))
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ColumnRule;
    type IntoIter = std::slice::Iter<'a, ColumnRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Value source for a column synthesized by the append pass.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendSource {
    Random {
        options: Vec<String>,
        weights: Option<Vec<u32>>,
    },
    Text {
        method: TextMethod,
    },
    Null,
}

/// A normalized append-pass rule.
#[derive(Debug, Clone, PartialEq)]
pub enum AppendRule {
    /// Rename (optionally) and find/replace inside an existing column.
    Overwrite {
        /// 1-based target column; out of range means "skip".
        column: usize,
        rename: Option<String>,
        find: String,
        replace: String,
    },
    /// Add a new column, then null out each row with probability `nullable`.
    Generate {
        name: String,
        source: AppendSource,
        nullable: f64,
    },
}

/// Requested column order, as 1-based positions into the current table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderSpec {
    pub order: Vec<usize>,
}

impl ReorderSpec {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// `[1, 2, ..., n]`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (1..=n).collect(),
        }
    }
}

/// Which passes a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunMode {
    GenerateOnly,
    Append,
    AppendAndReorder,
}

impl RunMode {
    /// Map the numeric mode of a rules file (`1`, `2`, `3`).
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(RunMode::GenerateOnly),
            2 => Some(RunMode::Append),
            3 => Some(RunMode::AppendAndReorder),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            RunMode::GenerateOnly => 1,
            RunMode::Append => 2,
            RunMode::AppendAndReorder => 3,
        }
    }

    pub fn runs_append(&self) -> bool {
        *self >= RunMode::Append
    }

    pub fn runs_reorder(&self) -> bool {
        *self == RunMode::AppendAndReorder
    }
}
