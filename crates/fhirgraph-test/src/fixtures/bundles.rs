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

//! Bundle fixtures.

use serde_json::{json, Value};

/// A Patient and a Condition whose `subject` references the Patient.
pub fn single_reference() -> Value {
    json!({
        "entry": [
            {
                "fullUrl": "urn:uuid:g-1",
                "resource": {"resourceType": "Patient"}
            },
            {
                "fullUrl": "urn:uuid:g-2",
                "resource": {
                    "resourceType": "Condition",
                    "subject": {"reference": "urn:uuid:g-1"}
                }
            }
        ]
    })
}

/// Three Observations with distinct scalar values.
pub fn three_observations() -> Value {
    json!({
        "resourceType": "Bundle",
        "entry": [
            {
                "fullUrl": "urn:uuid:0b5e-1",
                "resource": {"resourceType": "Observation", "status": "final", "valueInteger": 72}
            },
            {
                "fullUrl": "urn:uuid:0b5e-2",
                "resource": {"resourceType": "Observation", "status": "final", "valueInteger": 80}
            },
            {
                "fullUrl": "urn:uuid:0b5e-3",
                "resource": {"resourceType": "Observation", "status": "amended", "valueBoolean": true}
            }
        ]
    })
}

/// A Patient whose `name` is a list of objects with scalar and list fields.
pub fn patient_with_names() -> Value {
    json!({
        "entry": [
            {
                "fullUrl": "urn:uuid:p-1",
                "resource": {
                    "resourceType": "Patient",
                    "id": "p-1",
                    "name": [
                        {"use": "official", "family": ["Bode", "Jackie"]},
                        {"use": "nickname", "given": ["Jax"]}
                    ]
                }
            }
        ]
    })
}

/// A Patient whose scalar values need escaping.
pub fn quoted_values() -> Value {
    json!({
        "entry": [
            {
                "fullUrl": "urn:uuid:q-1",
                "resource": {
                    "resourceType": "Patient",
                    "family": "O'Brien",
                    "note": "line one\nline \"two\"",
                    "path": "C:\\records"
                }
            }
        ]
    })
}

/// A Condition with one resolvable and one dangling reference.
pub fn dangling_reference() -> Value {
    json!({
        "entry": [
            {
                "fullUrl": "urn:uuid:d-1",
                "resource": {"resourceType": "Patient"}
            },
            {
                "fullUrl": "urn:uuid:d-2",
                "resource": {
                    "resourceType": "Condition",
                    "subject": {"reference": "urn:uuid:d-1"},
                    "asserter": {"reference": "urn:uuid:missing"}
                }
            }
        ]
    })
}

/// Entries missing a resource or a resource type mixed with one usable entry.
pub fn untyped_entries() -> Value {
    json!({
        "entry": [
            {"fullUrl": "urn:uuid:u-1"},
            {"fullUrl": "urn:uuid:u-2", "resource": {"id": "no-type"}},
            {"fullUrl": "urn:uuid:u-3", "resource": {"resourceType": 7}},
            {"fullUrl": "urn:uuid:u-5", "resource": {"resourceType": ""}},
            {"fullUrl": "urn:uuid:u-4", "resource": {"resourceType": "Device"}},
            "not an entry"
        ]
    })
}

/// A realistic patient record with nine typed entries.
///
/// Entry order: Patient, Practitioner, Organization, Encounter, Condition,
/// Observation, Observation, Condition, Observation.
pub fn sample_bundle() -> Value {
    json!({
        "resourceType": "Bundle",
        "type": "transaction",
        "entry": [
            {
                "fullUrl": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184",
                "resource": {
                    "resourceType": "Patient",
                    "id": "5cbc121b-cd71-4428-b8b7-31e53eba8184",
                    "name": [
                        {"use": "official", "family": "O'Brien", "given": ["Jackie", "Ann"], "prefix": ["Ms."]}
                    ],
                    "gender": "female",
                    "birthDate": "1974-12-25",
                    "deceasedBoolean": false,
                    "multipleBirthInteger": 1,
                    "address": [
                        {
                            "line": ["165 Shanahan View"],
                            "city": "Springfield",
                            "postalCode": "01104",
                            "extension": [
                                {
                                    "url": "http://hl7.org/fhir/StructureDefinition/geolocation",
                                    "extension": [
                                        {"url": "latitude", "valueDecimal": 42.1},
                                        {"url": "longitude", "valueDecimal": -72.5}
                                    ]
                                }
                            ]
                        }
                    ],
                    "communication": [
                        {"language": {"coding": [{"system": "urn:ietf:bcp:47", "code": "en-US"}]}}
                    ]
                }
            },
            {
                "fullUrl": "urn:uuid:pr-0001",
                "resource": {
                    "resourceType": "Practitioner",
                    "id": "pr-0001",
                    "active": true,
                    "name": [{"family": "Huels", "prefix": ["Dr."]}],
                    "organization": {"reference": "urn:uuid:org-0001"}
                }
            },
            {
                "fullUrl": "urn:uuid:org-0001",
                "resource": {
                    "resourceType": "Organization",
                    "id": "org-0001",
                    "name": "Springfield General",
                    "telecom": [{"system": "phone", "value": "555-0100"}]
                }
            },
            {
                "fullUrl": "urn:uuid:enc-0001",
                "resource": {
                    "resourceType": "Encounter",
                    "status": "finished",
                    "class": {"system": "http://terminology.hl7.org/CodeSystem/v3-ActCode", "code": "AMB"},
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "participant": [
                        {"individual": {"reference": "urn:uuid:pr-0001"}}
                    ],
                    "serviceProvider": {"reference": "urn:uuid:org-0001"},
                    "period": {"start": "2020-01-01T10:00:00Z", "end": "2020-01-01T10:30:00Z"}
                }
            },
            {
                "fullUrl": "urn:uuid:cond-0001",
                "resource": {
                    "resourceType": "Condition",
                    "code": {
                        "coding": [{"system": "http://snomed.info/sct", "code": "44054006", "display": "Diabetes"}],
                        "text": "Diabetes"
                    },
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "encounter": {"reference": "urn:uuid:enc-0001"},
                    "evidence": [
                        {"detail": [{"reference": "urn:uuid:obs-0001"}]}
                    ]
                }
            },
            {
                "fullUrl": "urn:uuid:obs-0001",
                "resource": {
                    "resourceType": "Observation",
                    "status": "final",
                    "code": {"coding": [{"system": "http://loinc.org", "code": "4548-4", "display": "Hemoglobin A1c"}]},
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "encounter": {"reference": "urn:uuid:enc-0001"},
                    "valueQuantity": {"value": 6.3, "unit": "%", "system": "http://unitsofmeasure.org"}
                }
            },
            {
                "fullUrl": "urn:uuid:obs-0002",
                "resource": {
                    "resourceType": "Observation",
                    "status": "final",
                    "code": {"coding": [{"system": "http://loinc.org", "code": "8867-4", "display": "Heart rate"}]},
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "valueQuantity": {"value": 72, "unit": "/min"}
                }
            },
            {
                "fullUrl": "urn:uuid:cond-0002",
                "resource": {
                    "resourceType": "Condition",
                    "code": {"text": "Hypertension"},
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "recorder": {"reference": "urn:uuid:pr-0001"}
                }
            },
            {
                "fullUrl": "urn:uuid:obs-0003",
                "resource": {
                    "resourceType": "Observation",
                    "status": "final",
                    "subject": {"reference": "urn:uuid:5cbc121b-cd71-4428-b8b7-31e53eba8184"},
                    "performer": [{"reference": "urn:uuid:pr-0001"}],
                    "valueBoolean": true
                }
            }
        ]
    })
}

/// A bundle with an empty entry list.
pub fn empty_bundle() -> Value {
    json!({"resourceType": "Bundle", "entry": []})
}

/// A bundle with no `entry` key at all.
pub fn missing_entry() -> Value {
    json!({"resourceType": "Bundle", "type": "collection"})
}
