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


//! fhirgraph CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **convert**: bundle to Cypher statements, stdout or a file
//! - **batch-convert**: many bundles, `Cypher_<stem>.txt` each, optionally in parallel
//! - **inspect**: tree view of entities and their property nodes
//! - **stats**: entity, node, edge and statement counts
//! - **rules**: parse and list a rule file
//! - **upload**: run statements on a Neo4j server (feature `neo4j`)
//!
//! # Examples
//!
//! ```no_run
//! use fhirgraph_cli::commands::{convert, stats};
//!
//! # fn main() -> Result<(), String> {
//! convert("bundle.json", Some("rules.txt"), None, false)?;
//! stats("bundle.json", Some("rules.txt"), true)?;
//! # Ok(())
//! # }
//! ```
//!
//! Input files larger than 1 GB are rejected; set `FHIRGRAPH_MAX_FILE_SIZE`
//! (bytes) to change the limit.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
