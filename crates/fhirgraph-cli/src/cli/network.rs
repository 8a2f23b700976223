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


//! Database commands.

use crate::commands;
use clap::Subcommand;

/// Commands that talk to a Neo4j server.
#[derive(Subcommand)]
pub enum NetworkCommands {
    /// Convert a bundle and run its statements on a Neo4j server
    ///
    /// Connection settings come from a key=value file (uri, user, password);
    /// NEO4J_URI, NEO4J_USER and NEO4J_PASSWORD override it.
    Upload {
        /// Input bundle (JSON)
        #[arg(value_name = "FILE")]
        file: String,

        /// Edge-typing rule file
        #[arg(short, long, value_name = "RULES")]
        rules: Option<String>,

        /// Connection config file
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<String>,
    },
}

impl NetworkCommands {
    /// Execute the command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            NetworkCommands::Upload {
                file,
                rules,
                config,
            } => commands::upload(&file, rules.as_deref(), config.as_deref()),
        }
    }
}
