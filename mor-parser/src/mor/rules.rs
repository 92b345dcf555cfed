//! Rule files
//!
//!     Rule files describe how the MOR analyser combines morphemes:
//!
//!         @UTF8
//!         RULENAME: n-pl
//!         CTYPE: START
//!         NOUN = n\|.*
//!         if
//!         STARTCAT = [scat n]
//!         then
//!         RESULTCAT = ADD [num pl]
//!         RULEPACKAGE = {end}
//!
//!     They are only read to be drawn (see [plantuml](crate::mor::formats::plantuml)), so
//!     conditions and result categories stay verbatim text. Parsing goes through three
//!     stages like the other formats:
//!         1. [lines]: logical lines, classified by keyword
//!         2. [grammar]: rules and clauses over those lines
//!         3. [RuleParser::parse]: the [RuleSet], with variable patterns compiled

pub mod lines;
pub mod model;

pub(crate) mod grammar;

use chumsky::prelude::*;
use regex::Regex;

pub use lines::{classify, RuleLine};
pub use model::{Clause, ClauseAction, Ctype, Rule, RuleSet, Variable};

use crate::mor::ast::SourceLocation;
use crate::mor::error::{ParseError, StageError, SyntaxError};
use crate::mor::parsing::combinators::{run, to_syntax_error};
use grammar::{ParserError, RuleNode, RuleSetNode};

/// A rule file parser. Build it once and reuse it for every file.
pub struct RuleParser {
    grammar: BoxedParser<'static, RuleLine, RuleSetNode, ParserError>,
}

impl RuleParser {
    pub fn new() -> Self {
        Self {
            grammar: grammar::rule_file().boxed(),
        }
    }

    pub fn parse(&self, name: &str, source: &str) -> Result<RuleSet, ParseError> {
        self.parse_stages(name, source)
            .map_err(|error| error.named(name))
    }

    fn parse_stages(&self, name: &str, source: &str) -> Result<RuleSet, StageError> {
        let locator = SourceLocation::new(source);
        let lines = classify(source)?;
        tracing::debug!(lines = lines.len(), "classified rule file");

        let node = run(&self.grammar, lines, source.len())
            .map_err(|errors| to_syntax_error(errors, &locator))?;

        let mut rule_set = RuleSet::new(name);
        rule_set.preambles = node.preambles;
        for rule in node.rules {
            rule_set.insert(compile(rule, &locator)?);
        }
        tracing::debug!(rules = rule_set.rules.len(), "parsed rule file");
        Ok(rule_set)
    }
}

impl Default for RuleParser {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(node: RuleNode, locator: &SourceLocation) -> Result<Rule, SyntaxError> {
    let variables = node
        .variables
        .into_iter()
        .map(|variable| {
            let pattern = Regex::new(&variable.pattern).map_err(|error| {
                SyntaxError::custom(
                    locator.span_start(&variable.span),
                    format!("invalid pattern for {}: {}", variable.name, error),
                )
            })?;
            Ok(Variable {
                name: variable.name,
                pattern,
            })
        })
        .collect::<Result<Vec<_>, SyntaxError>>()?;

    Ok(Rule {
        name: node.name,
        ctype: node.ctype,
        variables,
        clauses: node.clauses,
    })
}
