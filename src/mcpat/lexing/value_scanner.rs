//! Attribute value scanner
//!
//! Attribute values in a report are free text (`53.2258 mm^2`, `1e-05 W`,
//! `ITRS high performance device type`). Numeric figures are recovered on demand by
//! scanning the value with a small logos lexer: one number, optionally followed by one
//! unit word, and nothing else.

use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t]+")]
enum ValueToken {
    #[regex(r"[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][-+]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z][A-Za-z0-9_^/]*", |lex| lex.slice().to_string())]
    Unit(String),
}

/// A number with its (possibly empty) unit, exactly as written in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    /// The value in square millimetres. `mm^2` and `um^2` are understood; a bare number
    /// is taken as already in mm^2.
    pub fn as_square_millimetres(&self) -> Option<f64> {
        match self.unit.as_str() {
            "" | "mm^2" => Some(self.value),
            "um^2" => Some(self.value * 1e-6),
            _ => None,
        }
    }

    /// The value in watts. `W`, `mW` and `uW` are understood; a bare number is taken as
    /// already in watts.
    pub fn as_watts(&self) -> Option<f64> {
        match self.unit.as_str() {
            "" | "W" => Some(self.value),
            "mW" => Some(self.value * 1e-3),
            "uW" => Some(self.value * 1e-6),
            _ => None,
        }
    }
}

/// Scan an attribute value of the form `<number> [unit]`.
///
/// Returns `None` for anything else, including values with trailing words
/// (`1 cores extra`) or no leading number.
pub fn parse_quantity(text: &str) -> Option<Quantity> {
    let mut lexer = ValueToken::lexer(text.trim());

    let value = match lexer.next()? {
        Ok(ValueToken::Number(value)) => value,
        _ => return None,
    };

    let unit = match lexer.next() {
        None => String::new(),
        Some(Ok(ValueToken::Unit(unit))) => unit,
        Some(_) => return None,
    };

    if lexer.next().is_some() {
        return None;
    }

    Some(Quantity { value, unit })
}
