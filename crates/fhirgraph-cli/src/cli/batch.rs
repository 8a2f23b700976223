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


//! Batch processing commands.

use crate::commands;
use clap::Subcommand;

/// Commands that process many bundles.
#[derive(Subcommand)]
pub enum BatchCommands {
    /// Convert many bundles, one statement file per bundle
    ///
    /// Each FILE produces `Cypher_<stem>.txt` in the output directory. A
    /// failing file does not stop the others.
    BatchConvert {
        /// Input bundles
        #[arg(value_name = "FILES", num_args = 1.., required = true)]
        files: Vec<String>,

        /// Edge-typing rule file
        #[arg(short, long, value_name = "RULES")]
        rules: Option<String>,

        /// Directory for the statement files
        #[arg(short, long, value_name = "DIR")]
        output_dir: String,

        /// Process files in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Print one line per file
        #[arg(long)]
        verbose: bool,
    },
}

impl BatchCommands {
    /// Execute the command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            BatchCommands::BatchConvert {
                files,
                rules,
                output_dir,
                parallel,
                verbose,
            } => commands::batch_convert(files, rules.as_deref(), &output_dir, parallel, verbose),
        }
    }
}
