//! Token types produced by the line classifier
//!
//! One token is produced per report line. The kind set is closed: a line that fits no
//! kind is a lexing error, never a fallback token.

use std::fmt;

/// The classification of a report line (and of the parse tree node built from it).
///
/// `Root` is synthetic: the lexer never produces it, the tree builder uses it for the
/// node that holds all top-level lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Synthetic tree root
    Root,
    /// `McPAT (version ...) is computing ...` / `... results ...` banners
    MetaData,
    /// A line of asterisks
    Separator,
    /// A blank line
    Paragraph,
    /// `config: ...` timing line
    CreationTime,
    /// `request: ...` timing line
    ComputationTime,
    /// `Technology 90 nm`
    Technology,
    /// `Interconnect metal projection= ...`
    InterconnectProjection,
    /// `Using Long Channel Devices When Appropriate`
    LongChannelDevices,
    /// `Core clock Rate(MHz) 1200`
    ClockRate,
    /// A bare label, optionally ending in a colon (`Core:`, `L2`)
    Component,
    /// `Total X: value`
    Parameter,
    /// `label = value` or `label : value`
    Attribute,
}

impl TokenKind {
    /// Short lower-case name used in renderings and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Root => "root",
            TokenKind::MetaData => "metaData",
            TokenKind::Separator => "separator",
            TokenKind::Paragraph => "paragraph",
            TokenKind::CreationTime => "creationTime",
            TokenKind::ComputationTime => "computationTime",
            TokenKind::Technology => "technology",
            TokenKind::InterconnectProjection => "interconnectProjection",
            TokenKind::LongChannelDevices => "longChannelDevices",
            TokenKind::ClockRate => "clockRate",
            TokenKind::Component => "component",
            TokenKind::Parameter => "parameter",
            TokenKind::Attribute => "attribute",
        }
    }

    /// Whether nodes of this kind name a hardware block that can be matched against the
    /// target hierarchy.
    pub fn is_block(&self) -> bool {
        matches!(self, TokenKind::Component | TokenKind::Parameter)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified line: its kind plus one or two trimmed payload strings.
///
/// Line-shape kinds (metadata, separator, paragraph, timing lines) carry the whole
/// trimmed line. Word-shape kinds carry the extracted label and, where the rule has
/// one, the value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: Vec<String>,
}

impl Token {
    pub fn new(kind: TokenKind, payload: Vec<String>) -> Self {
        Token { kind, payload }
    }

    /// A token whose payload is the whole (trimmed) line.
    pub fn line(kind: TokenKind, line: &str) -> Self {
        Token::new(kind, vec![line.trim().to_string()])
    }

    /// A token with a trimmed label and no value.
    pub fn label(kind: TokenKind, label: &str) -> Self {
        Token::new(kind, vec![label.trim().to_string()])
    }

    /// A token with a trimmed label and a trimmed value.
    pub fn pair(kind: TokenKind, label: &str, value: &str) -> Self {
        Token::new(kind, vec![label.trim().to_string(), value.trim().to_string()])
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload.as_slice() {
            [] => write!(f, "{}", self.kind),
            [one] => write!(f, "{} {:?}", self.kind, one),
            [label, value] => write!(f, "{} {:?} = {:?}", self.kind, label, value),
            more => write!(f, "{} {:?}", self.kind, more),
        }
    }
}

/// A token together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LexedLine {
    /// Number of leading whitespace characters (blank lines inherit the previous depth)
    pub depth: usize,
    /// 1-based line number in the report
    pub line_number: usize,
    pub token: Token,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_trim_payload() {
        let token = Token::pair(TokenKind::Attribute, " Area ", " 1.2 mm^2 ");
        assert_eq!(token.payload, vec!["Area".to_string(), "1.2 mm^2".to_string()]);
    }

    #[test]
    fn test_display() {
        let token = Token::pair(TokenKind::Parameter, "Total Cores", "1 cores");
        assert_eq!(token.to_string(), "parameter \"Total Cores\" = \"1 cores\"");
        assert_eq!(Token::label(TokenKind::Component, "Core").to_string(), "component \"Core\"");
    }

    #[test]
    fn test_block_kinds() {
        assert!(TokenKind::Component.is_block());
        assert!(TokenKind::Parameter.is_block());
        assert!(!TokenKind::Attribute.is_block());
        assert!(!TokenKind::Root.is_block());
    }
}
