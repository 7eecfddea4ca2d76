//! Line Classification
//!
//! Maps one report line to one token. McPAT's output is irregular (some section
//! headers carry a colon, others like `L2` do not), so classification is driven by an
//! ordered rule list rather than by hard-coding component names.
//!
//! Classification follows this specific order (important for correctness):
//!
//! Line-shape rules, matched against the whole line, payload is the whole line:
//! 1. Metadata banner (`McPAT (version ...) is computing ...` / `... results ...`)
//! 2. Separator (a line of asterisks)
//! 3. Blank line
//! 4. Creation time (`config: ...`)
//! 5. Computation time (`request: ...`)
//!
//! Word-shape rules, which extract a label and usually a value:
//! 6. Technology (`Technology 90 nm`)
//! 7. Interconnect projection (`Interconnect metal projection= ...`)
//! 8. Long channel devices flag
//! 9. Clock rate (`Core clock Rate(MHz) 1200`)
//! 10. Component header: any bare label, optional trailing colon, not starting with `Total`
//! 11. Parameter (`Total Cores: 1 cores`)
//! 12. Attribute (`Area = 1.2 mm^2`, `label : value`)
//!
//! The component rule accepts almost any label, so it must stay below the narrower
//! header rules: `Technology 90 nm` would otherwise become a component.

use crate::mcpat::lexing::tokens::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Whole-line rule: the line matches or it doesn't.
struct LineShapeRule {
    kind: TokenKind,
    pattern: Regex,
}

/// Rule that extracts payload fields from capture groups.
///
/// `extract` may still reject a line the pattern matched (returning `None`), in which
/// case classification continues with the next rule.
struct WordShapeRule {
    pattern: Regex,
    extract: fn(&Captures<'_>) -> Option<Token>,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("classification patterns are valid")
}

static LINE_SHAPE_RULES: Lazy<Vec<LineShapeRule>> = Lazy::new(|| {
    vec![
        LineShapeRule {
            kind: TokenKind::MetaData,
            pattern: compile(r"(?i)^McPat \(version.*(computing|results).+$"),
        },
        LineShapeRule {
            kind: TokenKind::Separator,
            pattern: compile(r"^\*+$"),
        },
        LineShapeRule {
            kind: TokenKind::Paragraph,
            pattern: compile(r"^\s*$"),
        },
        LineShapeRule {
            kind: TokenKind::CreationTime,
            pattern: compile(r"^\s*config\s*:.*$"),
        },
        LineShapeRule {
            kind: TokenKind::ComputationTime,
            pattern: compile(r"^\s*request\s*:.*$"),
        },
    ]
});

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

static WORD_SHAPE_RULES: Lazy<Vec<WordShapeRule>> = Lazy::new(|| {
    vec![
        WordShapeRule {
            pattern: compile(r"(?i)^\s*(Technology)\s*([0-9]+\s*nm)\s*$"),
            extract: |c| Some(Token::pair(TokenKind::Technology, group(c, 1), group(c, 2))),
        },
        WordShapeRule {
            pattern: compile(r"(?i)^\s*(Interconnect\s*Metal\s*Projection)\s*=\s*([\w ]+)$"),
            extract: |c| {
                Some(Token::pair(
                    TokenKind::InterconnectProjection,
                    group(c, 1),
                    group(c, 2),
                ))
            },
        },
        WordShapeRule {
            pattern: compile(r"(?i)^\s*(Using\s*long\s*channel\s*devices\s*when\s*appropriate)\s*"),
            extract: |c| Some(Token::label(TokenKind::LongChannelDevices, group(c, 1))),
        },
        WordShapeRule {
            pattern: compile(r"(?i)^\s*(Core\s*clock\s*rate)\s*\((MHz)\)\s([0-9]+)$"),
            extract: |c| {
                let value = format!("{} {}", group(c, 3), group(c, 2));
                Some(Token::pair(TokenKind::ClockRate, group(c, 1), &value))
            },
        },
        WordShapeRule {
            pattern: compile(r"^\s*(\w[\w/ ]*(\s*\([\w/: ]+\))*)\s*:?\s*$"),
            extract: |c| {
                let label = group(c, 1).trim();
                if label.starts_with("Total") {
                    return None;
                }
                Some(Token::label(TokenKind::Component, label))
            },
        },
        WordShapeRule {
            pattern: compile(r"^\s*(Total\s*\w[\w )(/]*)\s*:\s*(\w[\w ]*)?$"),
            extract: |c| Some(Token::pair(TokenKind::Parameter, group(c, 1), group(c, 2))),
        },
        WordShapeRule {
            pattern: compile(r"^\s*([\w ]+)\s*[:=]\s*([-+\w][-\w .^+]*)$"),
            extract: |c| Some(Token::pair(TokenKind::Attribute, group(c, 1), group(c, 2))),
        },
    ]
});

/// Classify a single line (without its line terminator).
///
/// Returns `None` when no rule accepts the line; the caller turns that into an
/// [`UnknownLineError`](crate::mcpat::lexing::UnknownLineError).
pub fn classify_line(line: &str) -> Option<Token> {
    if let Some(rule) = LINE_SHAPE_RULES.iter().find(|r| r.pattern.is_match(line)) {
        return Some(Token::line(rule.kind, line));
    }

    WORD_SHAPE_RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(line)
            .and_then(|caps| (rule.extract)(&caps))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("McPAT (version 0.8 of Aug, 2010) is computing the target processor...", TokenKind::MetaData)]
    #[case("McPAT (version 0.8 of Aug, 2010) results  (current print level is 5)", TokenKind::MetaData)]
    #[case("*****************************************************************", TokenKind::Separator)]
    #[case("", TokenKind::Paragraph)]
    #[case("      ", TokenKind::Paragraph)]
    #[case("config: 0.01 s", TokenKind::CreationTime)]
    #[case("  request : 0.42 s", TokenKind::ComputationTime)]
    #[case("  Technology 90 nm", TokenKind::Technology)]
    #[case("  Interconnect metal projection= aggressive interconnect technology projection", TokenKind::InterconnectProjection)]
    #[case("  Using Long Channel Devices When Appropriate", TokenKind::LongChannelDevices)]
    #[case("  Core clock Rate(MHz) 1200", TokenKind::ClockRate)]
    #[case("Core:", TokenKind::Component)]
    #[case("L2", TokenKind::Component)]
    #[case("Processor: ", TokenKind::Component)]
    #[case("          Integer ALUs (Count: 6 ):", TokenKind::Component)]
    #[case("  Total Cores: 1 cores ", TokenKind::Parameter)]
    #[case("  Total L2s:", TokenKind::Parameter)]
    #[case("  Total NoCs (Network/Bus):", TokenKind::Parameter)]
    #[case("    Area = 53.2258 mm^2", TokenKind::Attribute)]
    #[case("  Device Type= ITRS high performance device type", TokenKind::Attribute)]
    #[case("  Subthreshold Leakage with power gating = 1e-05 W", TokenKind::Attribute)]
    #[case("Device Type= X", TokenKind::Attribute)]
    #[case("  Total Cores: 2", TokenKind::Parameter)]
    fn test_classification(#[case] line: &str, #[case] expected: TokenKind) {
        let token = classify_line(line).expect("line should classify");
        assert_eq!(token.kind, expected, "line {:?}", line);
    }

    #[test]
    fn test_technology_wins_over_component() {
        let token = classify_line("  Technology 65 nm").unwrap();
        assert_eq!(
            token,
            Token::pair(TokenKind::Technology, "Technology", "65 nm")
        );
    }

    #[test]
    fn test_clock_rate_payload_carries_unit() {
        let token = classify_line("  Core clock Rate(MHz) 1200").unwrap();
        assert_eq!(token.payload, vec!["Core clock Rate", "1200 MHz"]);
    }

    #[test]
    fn test_component_label_keeps_count_suffix() {
        let token = classify_line("          Integer ALUs (Count: 6 ):").unwrap();
        assert_eq!(token.payload, vec!["Integer ALUs (Count: 6 )"]);
    }

    #[test]
    fn test_parameter_without_value_has_empty_value() {
        let token = classify_line("  Total L2s:").unwrap();
        assert_eq!(token.payload, vec!["Total L2s", ""]);
    }

    #[test]
    fn test_parameter_with_value() {
        let token = classify_line("  Total Cores: 1 cores ").unwrap();
        assert_eq!(token.payload, vec!["Total Cores", "1 cores"]);
    }

    #[test]
    fn test_attribute_payload() {
        let token = classify_line("  Device Type= ITRS high performance device type").unwrap();
        assert_eq!(
            token.payload,
            vec!["Device Type", "ITRS high performance device type"]
        );
    }

    #[test]
    fn test_whole_line_payload_for_line_shapes() {
        let token = classify_line("  request : 0.42 s").unwrap();
        assert_eq!(token.payload, vec!["request : 0.42 s"]);
    }

    #[rstest]
    #[case("@@@")]
    #[case("  Area = (none), really")]
    #[case("-> 42")]
    fn test_unknown_lines(#[case] line: &str) {
        assert_eq!(classify_line(line), None);
    }
}
