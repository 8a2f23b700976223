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


//! Rules command - validate and list an edge-typing rule file

use super::read_file;
use colored::Colorize;
use fhirgraph_core::RuleTable;

/// Line numbers (1-based) of non-blank lines with fewer than three tokens.
pub(crate) fn short_lines(text: &str) -> Vec<usize> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let tokens = line.split_whitespace().count();
            tokens > 0 && tokens < 3
        })
        .map(|(i, _)| i + 1)
        .collect()
}

/// Parse a rule file and list its rules.
///
/// Lines with fewer than three tokens are reported as skipped. With
/// `strict`, any skipped line is an error.
///
/// # Examples
///
/// ```no_run
/// use fhirgraph_cli::commands::rules;
///
/// # fn main() -> Result<(), String> {
/// rules("rules.txt", false)?;
/// # Ok(())
/// # }
/// ```
pub fn rules(file: &str, strict: bool) -> Result<(), String> {
    let text = read_file(file)?;
    let table = RuleTable::parse(&text);
    let skipped = short_lines(&text);

    println!("{} {}", "Rules:".cyan(), table.len());
    for (source, label, target) in table.entries() {
        println!(
            "  {} -[{}]-> {}",
            source.yellow(),
            label.magenta(),
            target.yellow()
        );
    }

    if !skipped.is_empty() {
        let lines: Vec<String> = skipped.iter().map(usize::to_string).collect();
        eprintln!(
            "{} skipped {} line(s) with fewer than three tokens: {}",
            "warning:".yellow().bold(),
            skipped.len(),
            lines.join(", ")
        );
        if strict {
            return Err(format!("{} malformed rule line(s) in '{}'", skipped.len(), file));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines() {
        let text = "Condition hasSubject Patient\n\nbroken line\n   \nA b C extra\nlonely\n";
        assert_eq!(short_lines(text), vec![3, 6]);
    }

    #[test]
    fn test_short_lines_clean_file() {
        assert!(short_lines("A r B\nC s D\n").is_empty());
    }
}
