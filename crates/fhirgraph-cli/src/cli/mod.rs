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


//! CLI command definitions and argument parsing.
//!
//! - [`core`]: single-document commands (convert, inspect, stats, rules)
//! - [`batch`]: batch-convert
//! - `network`: upload (feature `neo4j`)

mod batch;
mod core;
#[cfg(feature = "neo4j")]
mod network;

use clap::Subcommand;

pub use batch::BatchCommands;
pub use core::CoreCommands;
#[cfg(feature = "neo4j")]
pub use network::NetworkCommands;

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Core (convert, inspect, stats, rules)
/// ├── Batch (batch-convert)
/// └── Network (upload, feature `neo4j`)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Flattened so every command appears at the top level
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Batch(BatchCommands),

    #[cfg(feature = "neo4j")]
    #[command(flatten)]
    Network(NetworkCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns a printable message when reading, building, rendering or
    /// writing fails.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Batch(cmd) => cmd.execute(),
            #[cfg(feature = "neo4j")]
            Commands::Network(cmd) => cmd.execute(),
        }
    }
}
