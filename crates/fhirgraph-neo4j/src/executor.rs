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

//! Hand statements to a database session.
//!
//! The driver itself lives outside this crate: anything that can run one
//! statement implements [`StatementExecutor`], and [`execute_script`] runs a
//! whole script through it in order. A failing statement is recorded and
//! execution continues; there is no retry and no rollback.

use crate::cypher::{CypherScript, CypherStatement};
use std::fmt;

/// Runs a single statement against an open session.
pub trait StatementExecutor {
    /// Execute one statement, returning the driver's error message on failure.
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), String>;
}

impl<F> StatementExecutor for F
where
    F: FnMut(&CypherStatement) -> Result<(), String>,
{
    fn execute(&mut self, statement: &CypherStatement) -> Result<(), String> {
        self(statement)
    }
}

/// A statement that the executor rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFailure {
    /// Position of the statement in the script.
    pub index: usize,
    /// The statement text.
    pub query: String,
    /// The executor's error message.
    pub message: String,
}

impl fmt::Display for StatementFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statement {}: {}", self.index + 1, self.message)
    }
}

/// Outcome of running a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Number of statements attempted.
    pub attempted: usize,
    /// Statements that failed, in script order.
    pub failures: Vec<StatementFailure>,
}

impl ExecutionReport {
    /// Number of statements that succeeded.
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Returns true if every statement succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute every statement of `script` in order.
///
/// # Examples
///
/// ```
/// # use fhirgraph_neo4j::{execute_script, CypherScript, CypherStatement};
/// let mut script = CypherScript::new();
/// script.add(CypherStatement::create_node("CREATE (n_1:Patient {id: '1'})"));
///
/// let mut seen = Vec::new();
/// let mut executor = |s: &CypherStatement| -> Result<(), String> {
///     seen.push(s.query.clone());
///     Ok(())
/// };
/// let report = execute_script(&mut executor, &script);
///
/// assert!(report.is_success());
/// assert_eq!(seen.len(), 1);
/// ```
pub fn execute_script<E>(executor: &mut E, script: &CypherScript) -> ExecutionReport
where
    E: StatementExecutor + ?Sized,
{
    let mut report = ExecutionReport::default();

    for (index, statement) in script.statements.iter().enumerate() {
        report.attempted += 1;
        if let Err(message) = executor.execute(statement) {
            tracing::warn!(index, error = %message, "statement failed");
            report.failures.push(StatementFailure {
                index,
                query: statement.query.clone(),
                message,
            });
        }
    }

    tracing::debug!(
        attempted = report.attempted,
        failed = report.failures.len(),
        "executed script"
    );
    report
}
