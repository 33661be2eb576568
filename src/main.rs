// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use gilt::commands::copy::CopyCommand;
use gilt::commands::exec::ExecCommand;
use gilt::config::{ColorMode, new_gilt_config};
use gilt::error::{GiltError, Result, format_error_chain, format_error_with_color, get_exit_code};
use gilt::locking::NamedLockRegistry;
use gilt::logging;
use gilt::output::OutputSink;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gilt")]
#[command(author, version, about = "Shared utilities for gilt overlays", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// When to highlight warnings: auto, always or never
    #[arg(long, value_name = "WHEN", global = true)]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a file or a directory tree
    #[command(visible_alias = "cp")]
    Copy {
        /// File or directory to copy
        source: PathBuf,
        /// Destination path (its parent directory must exist)
        destination: PathBuf,
    },

    /// Run a program while holding a named lock
    #[command(visible_alias = "x")]
    Exec {
        /// Print the working directory and command line before running
        #[arg(short, long)]
        debug: bool,

        /// Directory to run the program in
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Lock name (defaults to --dir, then the program name)
        #[arg(long, value_name = "NAME")]
        lock: Option<String>,

        /// Program to run followed by its arguments, passed through untouched
        #[arg(
            value_name = "PROGRAM",
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    // Load configuration once at startup
    let mut config = match new_gilt_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };
    if let Some(color) = cli.color {
        config.output.color = color;
    }

    let sink = OutputSink::init_global(config.output.color);
    let registry = NamedLockRegistry::global();

    let result: Result<()> = (|| match cli.command {
        Commands::Copy {
            source,
            destination,
        } => {
            let command = CopyCommand::new(sink)?;
            command.execute(&source, &destination)
        }
        Commands::Exec {
            debug,
            dir,
            lock,
            command: argv,
        } => {
            let (program, args) = argv
                .split_first()
                .ok_or_else(|| {
                    GiltError::Io(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "no program given to exec",
                    ))
                })?;
            let command = ExecCommand::new(&config, sink, registry)?;
            command.execute(program, args, dir.as_deref(), lock.as_deref(), debug)
        }
    })();

    if let Err(e) = result {
        eprint!("{}", format_error_with_color(&e, config.output.color.use_color()));
        std::process::exit(get_exit_code(&e));
    }
}
