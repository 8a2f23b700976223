// fhirgraph - FHIR bundle to property graph transformation
//
// Copyright (c) 2025 fhirgraph contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! fhirgraph command line interface

use clap::Parser;
use fhirgraph_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// fhirgraph - FHIR bundles to Cypher
///
/// # Examples
///
/// ```bash
/// # Convert one bundle with a rule file
/// fhirgraph convert bundle.json --rules rules.txt --output Cypher_bundle.txt
///
/// # Convert a directory of bundles in parallel
/// fhirgraph batch-convert data/*.json --rules rules.txt --output-dir out --parallel
///
/// # Look at the graph
/// fhirgraph inspect bundle.json --verbose
/// ```
#[derive(Parser)]
#[command(name = "fhirgraph")]
#[command(author, version, about = "fhirgraph - FHIR bundles to Cypher statements", long_about = None)]
struct Cli {
    /// Debug logging on stderr (overrides RUST_LOG)
    #[arg(short = 'v', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fhirgraph=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fhirgraph=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
