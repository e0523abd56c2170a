use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "doxwarn",
    version,
    about = "Doxygen warning triage - deduplicate, drop known false positives, report",
    after_help = "Exit status of `check`: 0 when no warnings remain, 1 when warnings remain, \
                  2 when the tool itself failed (missing or malformed input)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Triage the Doxygen logs and write dox_warnings.log.
    ///
    /// Reads doc/doxygen/warnings.log, doc/doxygen/empty-params.log and
    /// doc/doxygen/class_methods.log below the build directory.
    Check {
        /// Build directory (default: current directory)
        #[arg(default_value = ".")]
        build_dir: String,
        /// Also print the report to stdout
        #[arg(long)]
        print: bool,
    },

    /// Show the nearest declaration after a line in each XML document, as seen by the filter
    Lookup {
        /// Source file path as printed by Doxygen
        file: String,
        /// Line of the warning
        line: u32,
        /// Build directory (default: current directory)
        #[arg(long, default_value = ".")]
        build_dir: String,
    },

    /// List the suppression rules
    Rules,
}
