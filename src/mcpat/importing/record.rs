//! Result records
//!
//! The figures extracted from one matched report block: area plus the four power
//! numbers, normalised to mm^2 and W. Every attribute line of the block is also kept
//! verbatim so callers can read figures this crate does not interpret (e.g. the power
//! gating variants of the leakage numbers).

use crate::mcpat::lexing::{parse_quantity, Quantity, TokenKind};
use crate::mcpat::parsing::{NodeId, ParseTree};
use serde::Serialize;
use std::fmt;

pub const AREA: &str = "Area";
pub const SUBTHRESHOLD_LEAKAGE: &str = "Subthreshold Leakage";
pub const GATE_LEAKAGE: &str = "Gate Leakage";
pub const PEAK_DYNAMIC: &str = "Peak Dynamic";
pub const RUNTIME_DYNAMIC: &str = "Runtime Dynamic";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// mm^2
    pub area: f64,
    /// W
    pub leakage_static: f64,
    /// W
    pub leakage_gate: f64,
    /// W
    pub peak_dynamic: f64,
    /// W
    pub runtime_dynamic: f64,
    pub attributes: Vec<(String, String)>,
}

impl ResultRecord {
    /// Verbatim value of an attribute line, by label.
    pub fn attribute(&self, label: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value.as_str())
    }

    /// Total leakage (subthreshold + gate).
    pub fn leakage(&self) -> f64 {
        self.leakage_static + self.leakage_gate
    }
}

/// A matched block lacks a required figure, or its value does not scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAttributeError {
    /// Label of the report block
    pub node: String,
    pub attribute: String,
    /// The value as written, when the attribute exists but is not a usable quantity
    pub found: Option<String>,
}

impl fmt::Display for MissingAttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            None => write!(
                f,
                "Block '{}' has no '{}' attribute",
                self.node, self.attribute
            ),
            Some(value) => write!(
                f,
                "Block '{}' has an unusable '{}' value: {:?}",
                self.node, self.attribute, value
            ),
        }
    }
}

impl std::error::Error for MissingAttributeError {}

struct Extraction<'a> {
    node: &'a str,
    attributes: &'a [(String, String)],
}

impl Extraction<'_> {
    fn figure(
        &self,
        label: &str,
        convert: fn(&Quantity) -> Option<f64>,
    ) -> Result<f64, MissingAttributeError> {
        let (_, value) = self
            .attributes
            .iter()
            .find(|(name, _)| name == label)
            .ok_or_else(|| MissingAttributeError {
                node: self.node.to_string(),
                attribute: label.to_string(),
                found: None,
            })?;

        parse_quantity(value)
            .as_ref()
            .and_then(convert)
            .ok_or_else(|| MissingAttributeError {
                node: self.node.to_string(),
                attribute: label.to_string(),
                found: Some(value.clone()),
            })
    }
}

/// Read the attribute children of a report block into a record.
///
/// Only direct attribute children are read; nested blocks report their own figures.
/// The first occurrence of a label wins.
pub fn extract_record(tree: &ParseTree, id: NodeId) -> Result<ResultRecord, MissingAttributeError> {
    let attributes: Vec<(String, String)> = tree
        .children(id)
        .iter()
        .filter(|&&c| tree.kind(c) == TokenKind::Attribute)
        .map(|&c| {
            (
                tree.label(c).to_string(),
                tree.value(c).unwrap_or("").to_string(),
            )
        })
        .collect();

    let extraction = Extraction {
        node: tree.label(id),
        attributes: &attributes,
    };

    Ok(ResultRecord {
        area: extraction.figure(AREA, Quantity::as_square_millimetres)?,
        leakage_static: extraction.figure(SUBTHRESHOLD_LEAKAGE, Quantity::as_watts)?,
        leakage_gate: extraction.figure(GATE_LEAKAGE, Quantity::as_watts)?,
        peak_dynamic: extraction.figure(PEAK_DYNAMIC, Quantity::as_watts)?,
        runtime_dynamic: extraction.figure(RUNTIME_DYNAMIC, Quantity::as_watts)?,
        attributes,
    })
}
