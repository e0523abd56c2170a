// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]

use clap::Parser;
use serde::Serialize;

use doxwarn::cli::commands::{Cli, Command};
use doxwarn::cli::output;
use doxwarn::config::Config;
use doxwarn::filter::Rule;
use doxwarn::pipeline;
use doxwarn::report::{Summary, EXIT_CLEAN, EXIT_FAILURE};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Exit code on success, error when the tool itself failed.
type CmdResult = Result<i32, Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn run(cli: Cli) -> CmdResult {
    match cli.command {
        Command::Check { build_dir, print } => cmd_check(&build_dir, print),
        Command::Lookup {
            file,
            line,
            build_dir,
        } => cmd_lookup(&file, line, &build_dir),
        Command::Rules => cmd_rules(),
    }
}

fn get_config(build_dir: &str) -> Result<Config, Box<dyn std::fmt::Display>> {
    if build_dir == "." {
        Config::from_cwd().map_err(map_err)
    } else {
        Ok(Config::new(build_dir))
    }
}

fn cmd_check(build_dir: &str, print: bool) -> CmdResult {
    let config = get_config(build_dir)?;
    let result = pipeline::run(&config).map_err(map_err)?;

    #[derive(Serialize)]
    struct CheckOutput {
        #[serde(flatten)]
        summary: Summary,
        report: String,
    }

    if print {
        print!("{}", result.report);
    }
    println!(
        "{}",
        output::format_json(&CheckOutput {
            summary: result.summary,
            report: config.report_path.display().to_string(),
        })
    );
    Ok(result.summary.exit_code())
}

fn cmd_lookup(file: &str, line: u32, build_dir: &str) -> CmdResult {
    let config = get_config(build_dir)?;
    let found = pipeline::lookup(&config, file, line).map_err(map_err)?;

    #[derive(Serialize)]
    struct LookupOutput<'a> {
        file: &'a str,
        line: u32,
        declarations: Vec<doxwarn::models::SymbolEntry>,
    }

    println!(
        "{}",
        output::format_json(&LookupOutput {
            file: config.normalize_source_path(file),
            line,
            declarations: found,
        })
    );
    Ok(EXIT_CLEAN)
}

fn cmd_rules() -> CmdResult {
    #[derive(Serialize)]
    struct RuleInfo {
        id: &'static str,
        description: &'static str,
    }

    let rules: Vec<RuleInfo> = Rule::ALL
        .iter()
        .map(|r| RuleInfo {
            id: r.as_str(),
            description: r.description(),
        })
        .collect();
    println!("{}", output::format_json(&rules));
    Ok(EXIT_CLEAN)
}
