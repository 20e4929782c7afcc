mod commands;
mod config;
mod diagnostics;
mod error;
mod info;
mod registry;
mod scanner;
mod signature;
mod types;
mod watch;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "objcdoc", about = "Index Objective-C method declarations in documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report malformed declarations and unresolved cross-references
    Check,
    /// Print the comprehensive reference document
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan documentation and list indexed objects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse one signature and print its canonical forms
    Show {
        /// The signature text, e.g. "- (void)setName:(NSString *)aName"
        #[arg(allow_hyphen_values = true)]
        signature: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-run check whenever documentation changes
    Watch,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => commands::check(),
        Commands::Info { json } => {
            info::run(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::List { json } => commands::list(json),
        Commands::Show { signature, json } => commands::show(&signature, json),
        Commands::Watch => watch::run(),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
