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


//! Single-document commands.

use crate::commands;
use clap::Subcommand;

/// Commands that work on one bundle or rule file.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Convert a bundle to Cypher statements
    ///
    /// Writes one statement per line: every node first, then every
    /// relationship.
    Convert {
        /// Input bundle (JSON)
        #[arg(value_name = "FILE")]
        file: String,

        /// Edge-typing rule file
        #[arg(short, long, value_name = "RULES")]
        rules: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Render numbers and booleans unquoted
        #[arg(long)]
        typed_literals: bool,
    },

    /// Print the graph built from a bundle
    Inspect {
        /// Input bundle (JSON)
        #[arg(value_name = "FILE")]
        file: String,

        /// Edge-typing rule file
        #[arg(short, long, value_name = "RULES")]
        rules: Option<String>,

        /// Show properties and parents of every node
        #[arg(long)]
        verbose: bool,
    },

    /// Count entities, property nodes, edges and statements
    Stats {
        /// Input bundle (JSON)
        #[arg(value_name = "FILE")]
        file: String,

        /// Edge-typing rule file
        #[arg(short, long, value_name = "RULES")]
        rules: Option<String>,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and list an edge-typing rule file
    Rules {
        /// Rule file
        #[arg(value_name = "FILE")]
        file: String,

        /// Fail on lines with fewer than three tokens
        #[arg(long)]
        strict: bool,
    },
}

impl CoreCommands {
    /// Execute the command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            CoreCommands::Convert {
                file,
                rules,
                output,
                typed_literals,
            } => commands::convert(&file, rules.as_deref(), output.as_deref(), typed_literals),
            CoreCommands::Inspect {
                file,
                rules,
                verbose,
            } => commands::inspect(&file, rules.as_deref(), verbose),
            CoreCommands::Stats { file, rules, json } => {
                commands::stats(&file, rules.as_deref(), json)
            }
            CoreCommands::Rules { file, strict } => commands::rules(&file, strict),
        }
    }
}
