//! Rule file grammar
//!
//!     document := PREAMBLE* rule*
//!     rule     := NAME CTYPE ASSIGNMENT* clause*
//!     clause   := IF condition* THEN RESULTCAT PACKAGES?
//!
//! The tokens are whole classified lines (see [lines](super::lines)). Variable patterns are
//! kept as text here and compiled when the [RuleSet](super::model::RuleSet) is built, so a
//! bad pattern is reported at its own line.

use chumsky::prelude::*;

use super::lines::RuleLine;
use super::model::{Clause, ClauseAction, Ctype};
use crate::mor::parsing::ir::Span;

pub(crate) type ParserError = Simple<RuleLine>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VariableNode {
    pub name: String,
    pub pattern: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleNode {
    pub name: String,
    pub ctype: Ctype,
    pub variables: Vec<VariableNode>,
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RuleSetNode {
    pub preambles: Vec<String>,
    pub rules: Vec<RuleNode>,
}

fn variable() -> impl Parser<RuleLine, VariableNode, Error = ParserError> + Clone {
    filter_map(|span: Span, line| match line {
        RuleLine::Assignment { name, pattern } => Ok(VariableNode {
            name,
            pattern,
            span,
        }),
        other => Err(Simple::expected_input_found(span, None, Some(other))),
    })
}

/// Any line that does not start or end a clause. Declarations inside a clause are
/// conditions too.
fn condition() -> impl Parser<RuleLine, String, Error = ParserError> + Clone {
    filter_map(|span: Span, line| match line {
        RuleLine::Text(text) => Ok(text),
        line @ RuleLine::Assignment { .. } => Ok(line.to_string()),
        other => Err(Simple::expected_input_found(span, None, Some(other))),
    })
}

fn clause() -> impl Parser<RuleLine, Clause, Error = ParserError> + Clone {
    just(RuleLine::If)
        .ignore_then(condition().repeated())
        .then_ignore(just(RuleLine::Then))
        .then(select! { RuleLine::ResultCat(cat) => cat })
        .then(select! { RuleLine::Packages(packages) => packages }.or_not())
        .map(|((conditions, result_cat), packages)| Clause {
            conditions,
            action: ClauseAction::new(result_cat, packages),
        })
        .labelled("clause")
}

fn rule() -> impl Parser<RuleLine, RuleNode, Error = ParserError> + Clone {
    select! { RuleLine::Name(name) => name }
        .then(select! { RuleLine::Ctype(ctype) => ctype })
        .then(variable().repeated())
        .then(clause().repeated())
        .map(|(((name, ctype), variables), clauses)| RuleNode {
            name,
            ctype,
            variables,
            clauses,
        })
        .labelled("rule")
}

pub(crate) fn rule_file() -> impl Parser<RuleLine, RuleSetNode, Error = ParserError> {
    select! { RuleLine::Preamble(text) => text }
        .repeated()
        .then(rule().repeated())
        .then_ignore(end())
        .map(|(preambles, rules)| RuleSetNode { preambles, rules })
}
