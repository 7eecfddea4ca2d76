//! Command-line interface for patbridge
//! Inspects McPAT reports at every pipeline stage and imports them into a component hierarchy.
//!
//! Usage:
//!   patbridge tokens `<path>`                                       - Show the classified lines
//!   patbridge tree `<path>` [--config `<config>`] [--format `<format>`] - Show the tree at a stage
//!   patbridge import `<path>` --target `<hierarchy>` [--format `<format>`] - Import a report
//!   patbridge summary `<path>`                                      - Show the report header
//!   patbridge list-configs                                        - List all available configurations

use clap::{Arg, Command};
use patbridge::mcpat::importing::{PatImporter, Placement};
use patbridge::mcpat::lexing::LexedLine;
use patbridge::mcpat::parsing::to_treeviz_str;
use patbridge::mcpat::pipeline::{parse_and_reshape, ExecutionOutput, PipelineExecutor};
use patbridge::mcpat::report::ReportSummary;
use patbridge::mcpat::target::TargetTree;
use std::path::Path;

fn main() {
    clilog::init_stderr_color_debug();

    let matches = Command::new("patbridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting McPAT reports and importing them into a component hierarchy")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens")
                .about("Show the token and indentation depth of every report line")
                .arg(
                    Arg::new("path")
                        .help("Path to the McPAT report")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Run a processing configuration and show the resulting tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the McPAT report")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Processing configuration (see list-configs)")
                        .default_value("default"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('treeviz' or 'json')")
                        .value_parser(["treeviz", "json"])
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import a report into a component hierarchy and print the placed records")
                .arg(
                    Arg::new("path")
                        .help("Path to the McPAT report")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Hierarchy description (.yaml, .yml or .json)")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .value_parser(["json", "yaml"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Show the global settings from the report header")
                .arg(
                    Arg::new("path")
                        .help("Path to the McPAT report")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-configs").about("List available processing configurations"))
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            handle_tokens_command(path);
        }
        Some(("tree", tree_matches)) => {
            let path = tree_matches.get_one::<String>("path").unwrap();
            let config = tree_matches.get_one::<String>("config").unwrap();
            let format = tree_matches.get_one::<String>("format").unwrap();
            handle_tree_command(path, config, format);
        }
        Some(("import", import_matches)) => {
            let path = import_matches.get_one::<String>("path").unwrap();
            let target = import_matches.get_one::<String>("target").unwrap();
            let format = import_matches.get_one::<String>("format").unwrap();
            handle_import_command(path, target, format);
        }
        Some(("summary", summary_matches)) => {
            let path = summary_matches.get_one::<String>("path").unwrap();
            handle_summary_command(path);
        }
        Some(("list-configs", _)) => {
            handle_list_configs_command();
        }
        _ => unreachable!(),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| fail("Error reading file", e))
}

fn print_tokens(lines: &[LexedLine]) {
    for line in lines {
        println!("{:>5} {:>3}  {}", line.line_number, line.depth, line.token);
    }
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let source = read_source(path);
    let output = PipelineExecutor::new()
        .execute("tokens", &source)
        .unwrap_or_else(|e| fail("Execution error", e));
    match output {
        ExecutionOutput::Tokens(lines) => print_tokens(&lines),
        ExecutionOutput::Tree(tree) => print!("{}", to_treeviz_str(&tree)),
    }
}

/// Handle the tree command
fn handle_tree_command(path: &str, config: &str, format: &str) {
    let source = read_source(path);
    let output = PipelineExecutor::new()
        .execute(config, &source)
        .unwrap_or_else(|e| fail("Execution error", e));

    match (output, format) {
        (ExecutionOutput::Tokens(lines), "json") => {
            let text = serde_json::to_string_pretty(&lines)
                .unwrap_or_else(|e| fail("Serialization error", e));
            println!("{}", text);
        }
        (ExecutionOutput::Tokens(lines), _) => print_tokens(&lines),
        (ExecutionOutput::Tree(tree), "json") => {
            let text = serde_json::to_string_pretty(&tree.outline())
                .unwrap_or_else(|e| fail("Serialization error", e));
            println!("{}", text);
        }
        (ExecutionOutput::Tree(tree), _) => print!("{}", to_treeviz_str(&tree)),
    }
}

fn load_target(path: &str) -> TargetTree {
    let text = read_source(path);
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        TargetTree::from_json(&text).unwrap_or_else(|e| fail("Invalid hierarchy", e))
    } else {
        TargetTree::from_yaml(&text).unwrap_or_else(|e| fail("Invalid hierarchy", e))
    }
}

fn render_placements(placements: &[Placement], format: &str) -> String {
    if format == "yaml" {
        serde_yaml::to_string(placements).unwrap_or_else(|e| fail("Serialization error", e))
    } else {
        let mut text = serde_json::to_string_pretty(placements)
            .unwrap_or_else(|e| fail("Serialization error", e));
        text.push('\n');
        text
    }
}

/// Handle the import command
fn handle_import_command(path: &str, target_path: &str, format: &str) {
    let source = read_source(path);
    let mut target = load_target(target_path);
    let placements = PatImporter::default()
        .import(&mut target, &source)
        .unwrap_or_else(|e| fail("Import failed", e));
    print!("{}", render_placements(&placements, format));
}

/// Handle the summary command
fn handle_summary_command(path: &str) {
    let source = read_source(path);
    let tree = parse_and_reshape(&source).unwrap_or_else(|e| fail("Malformed report", e));
    let summary = ReportSummary::from_tree(&tree);
    let text =
        serde_json::to_string_pretty(&summary).unwrap_or_else(|e| fail("Serialization error", e));
    println!("{}", text);
}

/// Handle the list-configs command
fn handle_list_configs_command() {
    let executor = PipelineExecutor::new();
    println!("Available processing configurations:\n");
    for config in executor.list_configs() {
        println!("  {}", config.name);
        println!("    {}", config.description);
    }
}
