//! Command handlers
//!
//! Each handler reports problems with individual files on stderr as it goes and returns an
//! error summary when the command as a whole failed, so `main` only decides the exit code.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use mor_config::MorConfig;
use mor_parser::mor::ast::Dictionary;
use mor_parser::mor::formats::{
    from_yaml, to_activity_diagram, to_digest_diagram, to_morcomb_string, to_mordict_string,
    to_yaml,
};
use mor_parser::mor::masking::{apply_masking, MaskingRules};
use mor_parser::mor::pipeline::{AnnotationParser, DictionaryParser};
use mor_parser::mor::rules::{RuleParser, RuleSet};
use mor_parser::mor::table::{self, Table};

const STDIN_NAME: &str = "<stdin>";

/// Where a command reads from. Files are rewritten in place by the linting commands;
/// stdin input goes to stdout instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(path)
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str(STDIN_NAME),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Input {
    fn read(&self) -> Result<String, String> {
        let result = match self {
            Input::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).map(|_| text)
            }
            Input::File(path) => fs::read_to_string(path),
        };
        result.map_err(|e| format!("{}: {}", self, e))
    }

    /// Replace the file's content, or print it for stdin.
    fn write_back(&self, text: &str) -> Result<(), String> {
        match self {
            Input::Stdin => print_out(text),
            Input::File(path) => {
                fs::write(path, text).map_err(|e| format!("{}: {}", self, e))?;
                tracing::info!(file = %self, "rewrote");
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatesFormat {
    Tsv,
    Json,
}

fn print_out(text: &str) -> Result<(), String> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("Error writing output: {}", e))
}

fn read_dictionary(parser: &DictionaryParser, input: &Input) -> Result<Dictionary, String> {
    let source = input.read()?;
    parser
        .parse(&input.to_string(), &source)
        .map_err(|e| e.to_string())
}

fn read_rule_set(input: &Input) -> Result<RuleSet, String> {
    let source = input.read()?;
    RuleParser::new()
        .parse(&input.to_string(), &source)
        .map_err(|e| e.to_string())
}

/// Run `step` on every input, reporting each failure; fail at the end if any did.
fn for_each_input<F>(inputs: &[Input], mut step: F) -> Result<(), String>
where
    F: FnMut(&Input) -> Result<(), String>,
{
    let mut failed = 0;
    for input in inputs {
        if let Err(e) = step(input) {
            eprintln!("{}", e);
            failed += 1;
        }
    }

    match failed {
        0 => Ok(()),
        1 => Err("1 file failed".to_string()),
        n => Err(format!("{} files failed", n)),
    }
}

pub fn dict_check(inputs: &[Input]) -> Result<(), String> {
    let parser = DictionaryParser::new();
    for_each_input(inputs, |input| {
        let dictionary = read_dictionary(&parser, input)?;
        tracing::info!(
            file = %input,
            entries = dictionary.entries.len(),
            disabled = dictionary.disabled_count(),
            "checked"
        );
        Ok(())
    })?;
    eprintln!("No error is detected!");
    Ok(())
}

pub fn dict_lint(inputs: &[Input], config: &MorConfig) -> Result<(), String> {
    let parser = DictionaryParser::new();
    let include_comments = config.serialization.include_comments;
    for_each_input(inputs, |input| {
        let dictionary = read_dictionary(&parser, input)?;
        input.write_back(&to_mordict_string(&dictionary, include_comments))
    })
}

pub fn dict_check_duplicates(inputs: &[Input], format: DuplicatesFormat) -> Result<(), String> {
    let parser = DictionaryParser::new();
    let tables = inputs
        .iter()
        .map(|input| read_dictionary(&parser, input).map(|d| table::to_table(&d)))
        .collect::<Result<Vec<Table>, String>>()?;
    let duplicates = Table::concat(tables).duplicates_by_phon();
    tracing::info!(rows = duplicates.len(), "found duplicates");

    match format {
        DuplicatesFormat::Tsv => {
            let mut out = Vec::new();
            duplicates
                .write_tsv(&mut out)
                .map_err(|e| format!("Error writing table: {}", e))?;
            print_out(&String::from_utf8_lossy(&out))
        }
        DuplicatesFormat::Json => {
            let json = serde_json::to_string_pretty(&duplicates.records())
                .map_err(|e| format!("JSON serialization failed: {}", e))?;
            print_out(&format!("{}\n", json))
        }
    }
}

pub fn dict_mask(inputs: &[Input], rules: &MaskingRules, config: &MorConfig) -> Result<(), String> {
    let parser = DictionaryParser::new();
    let include_comments = config.serialization.include_comments;
    for_each_input(inputs, |input| {
        let mut dictionary = read_dictionary(&parser, input)?;
        let before = dictionary.disabled_count();
        apply_masking(&mut dictionary, rules).map_err(|e| format!("{}: {}", input, e))?;
        tracing::info!(
            file = %input,
            masked = dictionary.disabled_count() - before,
            "masked"
        );
        input.write_back(&to_mordict_string(&dictionary, include_comments))
    })
}

pub fn morcomb_lint(input: &Input) -> Result<(), String> {
    let source = input.read()?;
    let annotation = AnnotationParser::new()
        .parse(&input.to_string(), &source)
        .map_err(|e| e.to_string())?;
    input.write_back(&to_morcomb_string(&annotation))
}

pub fn morcomb_to_yaml(input: &Input) -> Result<(), String> {
    let source = input.read()?;
    let annotation = AnnotationParser::new()
        .parse(&input.to_string(), &source)
        .map_err(|e| e.to_string())?;
    let yaml = to_yaml(&annotation).map_err(|e| format!("YAML serialization failed: {}", e))?;
    print_out(&yaml)
}

pub fn morcomb_from_yaml(input: &Input) -> Result<(), String> {
    let source = input.read()?;
    let annotation = from_yaml(&source).map_err(|e| format!("{}: {}", input, e))?;
    print_out(&to_morcomb_string(&annotation))
}

pub fn crule_uml(input: &Input) -> Result<(), String> {
    let rule_set = read_rule_set(input)?;
    print_out(&to_activity_diagram(&rule_set))
}

pub fn crule_uml_digest(input: &Input) -> Result<(), String> {
    let rule_set = read_rule_set(input)?;
    print_out(&to_digest_diagram(&rule_set))
}
