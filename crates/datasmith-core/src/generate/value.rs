use serde::Serialize;

/// A single cell of a generated table.
///
/// `Null` doubles as the "unset" placeholder the base pass writes into
/// dependent columns before the resolver fills them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Textual form used for key lookups and find/replace matching.
    ///
    /// Whole floats keep a trailing `.0` so `90.0` and `90` stay distinct.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
        }
    }

    /// Convert to a CSV-friendly string. Null becomes an empty field.
    pub fn to_csv_string(&self) -> String {
        self.to_text()
    }

    /// Read as floating point. Text is parsed; Null and garbage give `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => f.is_finite().then_some(*f),
            Value::String(s) => parse_float(s),
        }
    }

    /// Read as an integer, truncating through floating point (`"3.7"` → 3).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(*i),
            Value::Float(f) => truncate_float(*f),
            Value::String(s) => parse_integer(s),
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Build a replacement literal shaped like `self`: numeric when `self` is
    /// numeric and `literal` parses as that kind of number, text otherwise.
    pub fn literal_like(&self, literal: &str) -> Value {
        match self {
            Value::Int(_) => literal
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::text(literal)),
            Value::Float(_) => parse_float(literal)
                .map(Value::Float)
                .unwrap_or_else(|| Value::text(literal)),
            _ => Value::text(literal),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", format_float(*fl)),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a finite float from text, ignoring surrounding whitespace.
pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse an integer from text; `"3.0"` and `"3.9"` are accepted and truncated.
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_float(trimmed).and_then(truncate_float))
}

/// Truncate toward zero, rejecting NaN, infinities and out-of-range values.
pub fn truncate_float(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_through_float() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer(" 3.0 "), Some(3));
        assert_eq!(parse_integer("-3.9"), Some(-3));
        assert_eq!(parse_integer("Rep_1"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("1e300"), None);
    }

    #[test]
    fn test_text_form_keeps_float_marker() {
        assert_eq!(Value::Float(90.0).to_text(), "90.0");
        assert_eq!(Value::Float(94.5).to_text(), "94.5");
        assert_eq!(Value::Int(20).to_text(), "20");
        assert_eq!(Value::Null.to_text(), "");
    }

    #[test]
    fn test_lenient_numeric_reads() {
        assert_eq!(Value::text("6").as_f64(), Some(6.0));
        assert_eq!(Value::Float(7.9).as_i64(), Some(7));
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::text("abc").as_i64(), None);
    }

    #[test]
    fn test_literal_like_keeps_numeric_shape() {
        assert_eq!(Value::Int(20).literal_like("7"), Value::Int(7));
        assert_eq!(
            Value::Int(20).literal_like("Pendrive"),
            Value::text("Pendrive")
        );
        assert_eq!(Value::Float(1.5).literal_like("2.25"), Value::Float(2.25));
        assert_eq!(Value::text("a").literal_like("9"), Value::text("9"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Int(1),
            Value::Float(2.5),
            Value::text("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,1,2.5,"x"]"#);
    }
}
