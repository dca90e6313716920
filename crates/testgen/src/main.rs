// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use cix_testgen::{DEFAULT_OUTPUT_DIRECTORY, Scenario, render, write_image};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cix-testgen")]
#[command(about = "Generate directed memory-image tests for the CIX-32 testbench", long_about = None)]
struct Args {
    /// Scenarios to generate, all of them when omitted
    #[arg(value_enum)]
    scenarios: Vec<Scenario>,

    /// Directory the memory images are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIRECTORY)]
    out_dir: PathBuf,

    /// Print the images to stdout instead of writing files
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "list")]
    stdout: bool,

    /// List the scenarios with their sizes and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list: bool,

    /// Log debug details to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("cix_testgen=debug,warn")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let scenarios = if args.scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        args.scenarios.clone()
    };
    debug!(?scenarios, out_dir = %args.out_dir.display(), "generating");

    for scenario in scenarios {
        let program = scenario.build();

        if args.list {
            println!("{:<14} {:>3} bytes", scenario.name(), program.len());
        } else if args.stdout {
            print!("{}", render(&program));
        } else {
            let path = args.out_dir.join(scenario.file_name());
            let written = write_image(&program, &path)
                .with_context(|| format!("failed to generate {} test", scenario))?;
            println!("Generated {} ({} bytes)", path.display(), written);
        }
    }

    Ok(())
}
