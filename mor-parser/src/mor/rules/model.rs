//! Rule file model
//!
//!     A [RuleSet] is one rule file: its `@` preambles and its rules in file order. A rule has
//!     a name, a [Ctype], the variables it declares and its `if ... then` clauses.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

/// The `CTYPE:` of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ctype {
    Start,
    End,
    Dash,
    Hash,
    Plus,
    Dollar,
}

impl FromStr for Ctype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START" => Ok(Ctype::Start),
            "END" => Ok(Ctype::End),
            "-" => Ok(Ctype::Dash),
            "#" => Ok(Ctype::Hash),
            "+" => Ok(Ctype::Plus),
            "$" => Ok(Ctype::Dollar),
            other => Err(format!("unknown rule type {:?}", other)),
        }
    }
}

impl fmt::Display for Ctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ctype::Start => "START",
            Ctype::End => "END",
            Ctype::Dash => "-",
            Ctype::Hash => "#",
            Ctype::Plus => "+",
            Ctype::Dollar => "$",
        })
    }
}

/// What a matching clause does: produce a result category, optionally handing over to
/// further rule packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseAction {
    ResultOnly(String),
    ResultWithPackages(String, Vec<String>),
}

impl ClauseAction {
    /// `RULEPACKAGE = {}` names no package and is the same as leaving it out.
    pub fn new(result_cat: String, packages: Option<Vec<String>>) -> Self {
        match packages {
            Some(packages) if !packages.is_empty() => {
                ClauseAction::ResultWithPackages(result_cat, packages)
            }
            _ => ClauseAction::ResultOnly(result_cat),
        }
    }

    pub fn result_cat(&self) -> &str {
        match self {
            ClauseAction::ResultOnly(cat) | ClauseAction::ResultWithPackages(cat, _) => cat,
        }
    }

    pub fn packages(&self) -> &[String] {
        match self {
            ClauseAction::ResultOnly(_) => &[],
            ClauseAction::ResultWithPackages(_, packages) => packages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Condition lines between `if` and `then`, verbatim
    pub conditions: Vec<String>,
    pub action: ClauseAction,
}

/// A `NAME = pattern` declaration
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub pattern: Regex,
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern.as_str() == other.pattern.as_str()
    }
}

impl Eq for Variable {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub ctype: Ctype,
    pub variables: Vec<Variable>,
    pub clauses: Vec<Clause>,
}

impl Rule {
    pub fn is_start(&self) -> bool {
        self.ctype == Ctype::Start
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub name: String,
    pub preambles: Vec<String>,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preambles: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Add a rule. A later rule with the same name replaces the earlier one in place.
    pub fn insert(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => {
                tracing::debug!(rule = %rule.name, "rule redefined");
                *existing = rule;
            }
            None => self.rules.push(rule),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn start_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.is_start())
    }

    pub fn other_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| !r.is_start())
    }
}
