//! Command-line interface for mor
//! This binary checks, normalizes and converts MOR dictionaries, morcomb annotations and rule files.
//!
//! Usage:
//!   mor dict check [FILES...]                               - Report the first error of each file
//!   mor dict lint [FILES...]                                - Rewrite files in normal form
//!   mor dict check-duplicates [FILES...] [--format tsv|json] - List entries sharing a phon
//!   mor dict mask [FILES...] [--threshold N]                - Disable redundant entries
//!   mor morcomb lint|to-yaml|from-yaml FILE                 - Normalize or convert annotations
//!   mor crule uml|uml-digest FILE                           - Render rule files as PlantUML
//!
//! Dictionary commands read stdin and write stdout when no file is given. Elsewhere `-` stands
//! for stdin. Logs go to stderr: `-v` raises the level, `MOR_LOG` or `RUST_LOG` set a filter.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mor_config::{Loader, MorConfig, LOCAL_CONFIG_FILE};
use tracing_subscriber::EnvFilter;

use commands::{DuplicatesFormat, Input};

fn files_arg() -> Arg {
    Arg::new("files")
        .help("Dictionary files; stdin when none is given")
        .value_parser(value_parser!(PathBuf))
        .num_args(0..)
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Input file, or - for stdin")
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

fn build_cli() -> Command {
    Command::new("mor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking and converting MOR dictionaries, annotations and rule files")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("no-comments")
                .long("no-comments")
                .help("Drop comments from serialized dictionaries")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for debug and trace output)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("dict")
                .about("Dictionary (.cut) files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("check")
                        .about("Parse every file and report the first error of each")
                        .arg(files_arg()),
                )
                .subcommand(
                    Command::new("lint")
                        .about("Rewrite every file in normal form")
                        .arg(files_arg()),
                )
                .subcommand(
                    Command::new("check-duplicates")
                        .about("List the entries whose phon occurs more than once across all files")
                        .arg(files_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .short('f')
                                .help("Output format")
                                .value_parser(["tsv", "json"])
                                .default_value("tsv"),
                        ),
                )
                .subcommand(
                    Command::new("mask")
                        .about("Disable entries that repeat a more informative one")
                        .arg(files_arg())
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .help("Entries on lines up to this one are never masked")
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("morcomb")
                .about("Morcomb annotation files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("lint")
                        .about("Rewrite a file in normal form (stdout for stdin)")
                        .arg(file_arg()),
                )
                .subcommand(
                    Command::new("to-yaml")
                        .about("Print a file as YAML")
                        .arg(file_arg()),
                )
                .subcommand(
                    Command::new("from-yaml")
                        .about("Print a YAML file as morcomb text")
                        .arg(file_arg()),
                ),
        )
        .subcommand(
            Command::new("crule")
                .about("Rule (.crule) files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("uml")
                        .about("Print the PlantUML activity diagram of a rule file")
                        .arg(file_arg()),
                )
                .subcommand(
                    Command::new("uml-digest")
                        .about("Print the PlantUML state digest of a rule file")
                        .arg(file_arg()),
                ),
        )
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env("MOR_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<MorConfig, String> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("no-comments") {
        loader = loader
            .set_override("serialization.include_comments", false)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn inputs(matches: &ArgMatches) -> Vec<Input> {
    matches
        .get_many::<PathBuf>("files")
        .map(|files| files.cloned().map(Input::from).collect())
        .unwrap_or_else(|| vec![Input::Stdin])
}

fn input(matches: &ArgMatches) -> Input {
    matches
        .get_one::<PathBuf>("file")
        .cloned()
        .map_or(Input::Stdin, Input::from)
}

fn run(matches: &ArgMatches, config: &MorConfig) -> Result<(), String> {
    match matches.subcommand() {
        Some(("dict", sub)) => match sub.subcommand() {
            Some(("check", args)) => commands::dict_check(&inputs(args)),
            Some(("lint", args)) => commands::dict_lint(&inputs(args), config),
            Some(("check-duplicates", args)) => {
                let format = match args.get_one::<String>("format").map(String::as_str) {
                    Some("json") => DuplicatesFormat::Json,
                    _ => DuplicatesFormat::Tsv,
                };
                commands::dict_check_duplicates(&inputs(args), format)
            }
            Some(("mask", args)) => {
                let mut rules = config.masking_rules();
                if let Some(threshold) = args.get_one::<i64>("threshold") {
                    rules = rules.with_threshold(*threshold);
                }
                commands::dict_mask(&inputs(args), &rules, config)
            }
            _ => unreachable!("subcommand_required"),
        },
        Some(("morcomb", sub)) => match sub.subcommand() {
            Some(("lint", args)) => commands::morcomb_lint(&input(args)),
            Some(("to-yaml", args)) => commands::morcomb_to_yaml(&input(args)),
            Some(("from-yaml", args)) => commands::morcomb_from_yaml(&input(args)),
            _ => unreachable!("subcommand_required"),
        },
        Some(("crule", sub)) => match sub.subcommand() {
            Some(("uml", args)) => commands::crule_uml(&input(args)),
            Some(("uml-digest", args)) => commands::crule_uml_digest(&input(args)),
            _ => unreachable!("subcommand_required"),
        },
        _ => unreachable!("subcommand_required"),
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "loaded configuration");

    match run(&matches, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
