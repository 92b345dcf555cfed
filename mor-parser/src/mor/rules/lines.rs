//! Rule file line classification
//!
//!     Rule files are line oriented, so their "tokens" are whole logical lines:
//!
//!         - a line ending with `\` is joined with the next one (with a single space)
//!         - blank lines and `%` comment lines are dropped
//!         - every other line is classified by its leading keyword
//!
//!     Each classified line keeps the byte range of the physical lines it came from, for
//!     error positions.

use std::fmt;
use std::ops::Range;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::mor::ast::range::SourceLocation;
use crate::mor::error::LexError;
use crate::mor::parsing::combinators::DescribeToken;
use crate::mor::rules::model::Ctype;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleLine {
    /// `@text`
    Preamble(String),
    /// `RULENAME: name`
    Name(String),
    /// `CTYPE: START`
    Ctype(Ctype),
    /// `NAME = pattern`
    Assignment { name: String, pattern: String },
    If,
    Then,
    /// `RESULTCAT = category`
    ResultCat(String),
    /// `RULEPACKAGE = {a, b}`
    Packages(Vec<String>),
    /// Anything else; inside a clause, a condition
    Text(String),
}

impl fmt::Display for RuleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLine::Preamble(text) => write!(f, "@{}", text),
            RuleLine::Name(name) => write!(f, "RULENAME: {}", name),
            RuleLine::Ctype(ctype) => write!(f, "CTYPE: {}", ctype),
            RuleLine::Assignment { name, pattern } => write!(f, "{} = {}", name, pattern),
            RuleLine::If => f.write_str("if"),
            RuleLine::Then => f.write_str("then"),
            RuleLine::ResultCat(cat) => write!(f, "RESULTCAT = {}", cat),
            RuleLine::Packages(packages) => write!(f, "RULEPACKAGE = {{{}}}", packages.join(", ")),
            RuleLine::Text(text) => f.write_str(text),
        }
    }
}

impl DescribeToken for RuleLine {
    fn describe(&self) -> String {
        match self {
            RuleLine::Preamble(_) => "'@' line".to_string(),
            RuleLine::Name(_) => "'RULENAME:' line".to_string(),
            RuleLine::Ctype(_) => "'CTYPE:' line".to_string(),
            RuleLine::Assignment { name, .. } => format!("declaration of {}", name),
            RuleLine::If => "'if'".to_string(),
            RuleLine::Then => "'then'".to_string(),
            RuleLine::ResultCat(_) => "'RESULTCAT' line".to_string(),
            RuleLine::Packages(_) => "'RULEPACKAGE' line".to_string(),
            RuleLine::Text(text) => format!("{:?}", text),
        }
    }
}

static ASSIGNMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9^&+\-_:@./]+)\s*=\s*(\S.*)$").unwrap());

/// Split a rule file into classified logical lines.
pub fn classify(source: &str) -> Result<Vec<(RuleLine, Range<usize>)>, LexError> {
    let locator = SourceLocation::new(source);
    let mut lines = Vec::new();
    let mut pending: Option<(String, usize)> = None;
    let mut offset = 0;

    for physical in source.split_inclusive('\n') {
        let start = offset;
        offset += physical.len();
        let content = physical.trim_end_matches(&['\n', '\r'][..]);

        let (mut text, line_start) = match pending.take() {
            Some((mut joined, joined_start)) => {
                joined.push(' ');
                joined.push_str(content.trim());
                (joined, joined_start)
            }
            None => (content.trim().to_string(), start),
        };

        if let Some(stripped) = text.strip_suffix('\\') {
            text = stripped.trim_end().to_string();
            pending = Some((text, line_start));
            continue;
        }

        let span = line_start..start + content.len();
        if let Some(line) = classify_line(&text, &locator, span.start)? {
            lines.push((line, span));
        }
    }

    if let Some((text, line_start)) = pending {
        if let Some(line) = classify_line(&text, &locator, line_start)? {
            lines.push((line, line_start..source.len()));
        }
    }

    tracing::trace!(count = lines.len(), "classified rule lines");
    Ok(lines)
}

fn keyword_value<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(keyword)?.trim_start();
    Some(rest.strip_prefix('=')?.trim())
}

fn classify_line(
    text: &str,
    locator: &SourceLocation,
    start: usize,
) -> Result<Option<RuleLine>, LexError> {
    let unrecognized = || LexError::UnrecognizedInput {
        position: locator.byte_to_position(start),
        text: text.to_string(),
    };

    if text.is_empty() || text.starts_with('%') {
        return Ok(None);
    }

    let line = if let Some(rest) = text.strip_prefix('@') {
        RuleLine::Preamble(rest.trim().to_string())
    } else if let Some(rest) = text.strip_prefix("RULENAME:") {
        let name = rest.split_whitespace().next().ok_or_else(unrecognized)?;
        RuleLine::Name(name.to_string())
    } else if let Some(rest) = text.strip_prefix("CTYPE:") {
        let value = rest.split_whitespace().next().unwrap_or_default();
        RuleLine::Ctype(value.parse().map_err(|_| unrecognized())?)
    } else if text == "if" {
        RuleLine::If
    } else if text == "then" {
        RuleLine::Then
    } else if let Some(value) = keyword_value(text, "RESULTCAT") {
        RuleLine::ResultCat(value.to_string())
    } else if let Some(value) = keyword_value(text, "RULEPACKAGE") {
        let inner = value
            .strip_prefix('{')
            .and_then(|v| v.strip_suffix('}'))
            .ok_or_else(unrecognized)?;
        let packages = inner
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        RuleLine::Packages(packages)
    } else if let Some(captures) = ASSIGNMENT_REGEX.captures(text) {
        RuleLine::Assignment {
            name: captures[1].to_string(),
            pattern: captures[2].trim_end().to_string(),
        }
    } else {
        RuleLine::Text(text.to_string())
    };
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::range::Position;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<RuleLine> {
        classify(source)
            .expect("classify")
            .into_iter()
            .map(|(line, _)| line)
            .collect()
    }

    #[rstest]
    #[case("@UTF8", RuleLine::Preamble("UTF8".into()))]
    #[case("RULENAME: n-pl", RuleLine::Name("n-pl".into()))]
    #[case("CTYPE: START", RuleLine::Ctype(Ctype::Start))]
    #[case("CTYPE: $", RuleLine::Ctype(Ctype::Dollar))]
    #[case("if", RuleLine::If)]
    #[case("then", RuleLine::Then)]
    #[case("RESULTCAT = ADD [scat n]", RuleLine::ResultCat("ADD [scat n]".into()))]
    #[case(
        "RULEPACKAGE = {n-sfx, pl}",
        RuleLine::Packages(vec!["n-sfx".into(), "pl".into()])
    )]
    #[case("RULEPACKAGE = {}", RuleLine::Packages(vec![]))]
    #[case(
        "$NOUN = n|.*",
        RuleLine::Text("$NOUN = n|.*".into())
    )]
    #[case(
        "NOUN = n|.*",
        RuleLine::Assignment { name: "NOUN".into(), pattern: "n|.*".into() }
    )]
    #[case("STARTCAT = [scat n]", RuleLine::Assignment { name: "STARTCAT".into(), pattern: "[scat n]".into() })]
    #[case("NEXTCAT [scat v]", RuleLine::Text("NEXTCAT [scat v]".into()))]
    fn test_classification(#[case] line: &str, #[case] expected: RuleLine) {
        assert_eq!(kinds(line), vec![expected]);
    }

    #[test]
    fn test_comments_and_blanks_are_dropped() {
        assert_eq!(kinds("% note\n\n   \nif\n"), vec![RuleLine::If]);
    }

    #[test]
    fn test_continuation_joins_lines() {
        let lines = classify("STARTCAT [scat n] \\\n   [num pl]\nthen\n").expect("classify");
        assert_eq!(lines[0].0, RuleLine::Text("STARTCAT [scat n] [num pl]".into()));
        assert_eq!(lines[0].1.start, 0);
        assert_eq!(lines[1].0, RuleLine::Then);
    }

    #[test]
    fn test_bad_ctype_is_reported() {
        let error = classify("RULENAME: x\nCTYPE: MIDDLE\n").unwrap_err();
        assert_eq!(error.position(), Position::new(2, 1));
    }

    #[test]
    fn test_packages_need_braces() {
        assert!(classify("RULEPACKAGE = a, b\n").is_err());
    }
}
