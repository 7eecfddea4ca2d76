//! Report summary
//!
//! The report header carries the run's global settings: the McPAT version banner,
//! technology node, core clock, interconnect projection and device flags, plus the
//! timing lines. [`ReportSummary::from_tree`] collects them from any stage of the tree;
//! header tokens are never moved by the passes, only dissolved out of separators.

use crate::mcpat::lexing::TokenKind;
use crate::mcpat::parsing::ParseTree;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(version\s+([^)]*)\)").expect("version pattern is valid"));

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]+)").expect("number pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub version: Option<String>,
    pub technology_nm: Option<u32>,
    pub clock_rate_mhz: Option<u32>,
    pub interconnect_projection: Option<String>,
    pub long_channel_devices: bool,
    pub creation_time: Option<String>,
    pub computation_time: Option<String>,
}

fn leading_number(text: &str) -> Option<u32> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Text after the first colon of a `config: ...` / `request: ...` line.
fn timing_value(line: &str) -> String {
    line.split_once(':')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

impl ReportSummary {
    pub fn from_tree(tree: &ParseTree) -> Self {
        let mut summary = ReportSummary::default();

        for id in tree.reachable() {
            let node = tree.node(id);
            match node.kind {
                TokenKind::MetaData => {
                    if summary.version.is_none() {
                        summary.version = VERSION
                            .captures(node.label())
                            .and_then(|caps| caps.get(1))
                            .map(|m| m.as_str().trim().to_string());
                    }
                }
                TokenKind::Technology => {
                    summary.technology_nm = node.value().and_then(leading_number);
                }
                TokenKind::ClockRate => {
                    summary.clock_rate_mhz = node.value().and_then(leading_number);
                }
                TokenKind::InterconnectProjection => {
                    summary.interconnect_projection = node.value().map(str::to_string);
                }
                TokenKind::LongChannelDevices => summary.long_channel_devices = true,
                TokenKind::CreationTime => {
                    summary.creation_time = Some(timing_value(node.label()));
                }
                TokenKind::ComputationTime => {
                    summary.computation_time = Some(timing_value(node.label()));
                }
                _ => {}
            }
        }

        summary
    }
}
