//! Display output for query results.
//!
//! [`to_display()`] renders a [`Value`] the way the `jqlite` binary prints
//! results: two-space indentation, one element or member per line, object
//! members in insertion order.
//!
//! This is a display format, not an encoding. Strings are wrapped in double
//! quotes but **not escaped**, so a string containing `"` or a newline is
//! printed verbatim and the output may not parse back as JSON. Use
//! [`to_json()`] when the output must be re-parseable.
//!
//! Empty arrays and objects keep the multi-line layout: `[`, an empty line,
//! then the closing bracket.
//!
//! # Number formatting
//!
//! - Integral values within the exactly representable range (|n| < 2^53)
//!   print without a fractional part: `3.0` prints as `3`
//! - Everything else prints in shortest round-trip form: `0.1`, `2.5`,
//!   switching to exponent notation for very small or large magnitudes
//!   (`1.5e-07`, `1e+300`)
//! - Non-finite values (never produced by JSON input) print as `null`
//!
//! # Examples
//!
//! ```
//! use jqlite::Value;
//! use jqlite::output::to_display;
//!
//! let value = Value::from(vec![Value::from(1), Value::from(2.5)]);
//! assert_eq!(to_display(&value), "[\n  1,\n  2.5\n]");
//! ```

use crate::{
    convert::value_to_json,
    value::{Object, Value},
};

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Decimal exponents printed in positional notation; others use `1.5e-07` form.
const MIN_PLAIN_EXPONENT: i32 = -4;
const MAX_PLAIN_EXPONENT: i32 = 16;

pub struct DisplayPrinter {
    indent_width: usize,
}

impl Default for DisplayPrinter {
    fn default() -> Self {
        DisplayPrinter { indent_width: 2 }
    }
}

impl DisplayPrinter {
    pub fn new(indent_width: usize) -> Self {
        DisplayPrinter { indent_width }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.print_value(value, 0, &mut out);
        out
    }

    fn print_value(&self, value: &Value, indent: usize, out: &mut String) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&format_number(*n)),
            Value::String(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            Value::Array(items) => self.print_array(items, indent, out),
            Value::Object(members) => self.print_object(members, indent, out),
        }
    }

    fn print_array(&self, items: &[Value], indent: usize, out: &mut String) {
        out.push_str("[\n");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            self.push_indent(indent + 1, out);
            self.print_value(item, indent + 1, out);
        }
        out.push('\n');
        self.push_indent(indent, out);
        out.push(']');
    }

    fn print_object(&self, members: &Object, indent: usize, out: &mut String) {
        out.push_str("{\n");
        for (i, (key, value)) in members.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            self.push_indent(indent + 1, out);
            out.push('"');
            out.push_str(key);
            out.push_str("\": ");
            self.print_value(value, indent + 1, out);
        }
        out.push('\n');
        self.push_indent(indent, out);
        out.push('}');
    }

    fn push_indent(&self, level: usize, out: &mut String) {
        out.extend(std::iter::repeat_n(' ', level * self.indent_width));
    }
}

/// Formats a number for display.
///
/// # Examples
///
/// ```
/// use jqlite::output::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.1), "0.1");
/// assert_eq!(format_number(1.5e-7), "1.5e-07");
/// assert_eq!(format_number(1e300), "1e+300");
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        // -0.0 prints as 0 like every other integral value
        return format!("{}", n as i64);
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7"
    let scientific = format!("{:e}", n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return n.to_string();
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return n.to_string(),
    };

    if (MIN_PLAIN_EXPONENT..=MAX_PLAIN_EXPONENT).contains(&exponent) {
        n.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Renders a value in the display format described in the module docs.
pub fn to_display(value: &Value) -> String {
    DisplayPrinter::default().print(value)
}

/// Renders a value as compact, properly escaped JSON.
///
/// # Examples
///
/// ```
/// use jqlite::Value;
/// use jqlite::output::to_json;
///
/// let mut obj = Value::object();
/// obj.insert("quote", "say \"hi\"").unwrap();
/// obj.insert("n", 3).unwrap();
///
/// assert_eq!(to_json(&obj), r#"{"quote":"say \"hi\"","n":3}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    value_to_json(value).to_string()
}

/// Renders a value as pretty-printed, properly escaped JSON.
pub fn to_json_pretty(value: &Value) -> String {
    let json = value_to_json(value);
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
}
