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

//! Canonical bundle fixtures.
//!
//! - **bundles**: small focused bundles and one realistic patient record
//! - **errors**: malformed inputs for error handling tests

mod bundles;
pub mod errors;

pub use bundles::*;

use crate::FixtureList;

/// Rule table text matching the resource types used by [`sample_bundle`].
pub const SAMPLE_RULES: &str = "\
Encounter hasSubject Patient
Encounter hasParticipant Practitioner
Encounter hasServiceProvider Organization
Condition hasSubject Patient
Condition hasEncounter Encounter
Condition hasRecorder Practitioner
Condition hasEvidence Observation
Observation hasSubject Patient
Observation hasEncounter Encounter
Practitioner worksFor Organization
";

/// Returns all bundle fixtures for iteration.
pub fn all() -> FixtureList {
    vec![
        ("single_reference", single_reference),
        ("three_observations", three_observations),
        ("patient_with_names", patient_with_names),
        ("quoted_values", quoted_values),
        ("dangling_reference", dangling_reference),
        ("untyped_entries", untyped_entries),
        ("sample_bundle", sample_bundle),
        ("empty_bundle", empty_bundle),
        ("missing_entry", missing_entry),
    ]
}
