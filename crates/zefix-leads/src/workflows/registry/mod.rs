//! Per-canton registry extraction with best-effort aggregation.

mod client;
mod parser;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::workflows::companies::{classify, CompanyRecord};

pub use client::{RegionQuery, RegistryClient, RegistryError, ZefixHttpClient};

use parser::RegistryEntry;

/// Earliest registration date still considered "new".
pub fn cutoff_date(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionStatus {
    Fetched {
        kept: usize,
        outside_window: usize,
        unsupported_form: usize,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    pub canton: String,
    #[serde(flatten)]
    pub status: RegionStatus,
}

impl RegionReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RegionStatus::Failed { .. })
    }
}

/// Outcome of one extraction: the kept records in fetch order plus what
/// happened to every requested canton.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub regions: Vec<RegionReport>,
    pub records: Vec<CompanyRecord>,
}

impl ExtractionReport {
    pub fn failed_regions(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions.iter().filter(|region| region.is_failed())
    }
}

struct RegionBatch {
    records: Vec<CompanyRecord>,
    outside_window: usize,
    unsupported_form: usize,
}

pub struct RegistryFetcher<C> {
    client: C,
}

impl<C> RegistryFetcher<C>
where
    C: RegistryClient,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Query every canton in order. A canton that fails is logged and
    /// reported, never fatal to the others.
    pub async fn fetch(&self, cantons: &[String], cutoff: NaiveDate) -> ExtractionReport {
        let registered_from = cutoff.format("%Y-%m-%d").to_string();
        let mut report = ExtractionReport::default();

        for canton in cantons {
            let query = RegionQuery {
                canton: canton.clone(),
                registered_from: registered_from.clone(),
            };

            let status = match self.fetch_region(&query).await {
                Ok(batch) => {
                    info!(
                        canton = %canton,
                        kept = batch.records.len(),
                        outside_window = batch.outside_window,
                        unsupported_form = batch.unsupported_form,
                        "canton extracted"
                    );
                    let status = RegionStatus::Fetched {
                        kept: batch.records.len(),
                        outside_window: batch.outside_window,
                        unsupported_form: batch.unsupported_form,
                    };
                    report.records.extend(batch.records);
                    status
                }
                Err(err) => {
                    warn!(canton = %canton, error = %err, "skipping canton after registry failure");
                    RegionStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            };

            report.regions.push(RegionReport {
                canton: canton.clone(),
                status,
            });
        }

        report
    }

    async fn fetch_region(&self, query: &RegionQuery) -> Result<RegionBatch, RegistryError> {
        let document = self.client.search_region(query).await?;
        let entries = parser::parse_entries(&document)?;
        Ok(select_new_companies(
            entries,
            &query.canton,
            &query.registered_from,
        ))
    }
}

fn select_new_companies(entries: Vec<RegistryEntry>, canton: &str, cutoff: &str) -> RegionBatch {
    let mut batch = RegionBatch {
        records: Vec::new(),
        outside_window: 0,
        unsupported_form: 0,
    };

    for entry in entries {
        // ISO dates compare chronologically as strings; blank dates fall before any cutoff.
        if entry.registration_date.as_str() < cutoff {
            batch.outside_window += 1;
            continue;
        }

        let legal_form = classify(&entry.legal_form);
        if !legal_form.is_prospect() {
            batch.unsupported_form += 1;
            continue;
        }

        batch.records.push(CompanyRecord {
            name: entry.name,
            legal_form,
            canton: canton.to_string(),
            city: entry.city,
            postal_code: entry.postal_code,
            address: entry.address,
            registration_date: entry.registration_date,
            uid: entry.uid,
            register_number: entry.register_number,
        });
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::companies::LegalForm;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    struct CannedRegistry {
        responses: HashMap<&'static str, Value>,
    }

    impl RegistryClient for CannedRegistry {
        async fn search_region(&self, query: &RegionQuery) -> Result<Value, RegistryError> {
            self.responses
                .get(query.canton.as_str())
                .cloned()
                .ok_or_else(|| RegistryError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
        }
    }

    fn entry(name: &str, legal_form: &str, date: &str) -> Value {
        json!({ "name": name, "legalForm": legal_form, "registrationDate": date, "canton": "ZH" })
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 12).expect("valid cutoff")
    }

    #[test]
    fn cutoff_subtracts_lookback_days() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        assert_eq!(cutoff_date(today, 7), cutoff());
        assert_eq!(cutoff_date(today, 0), today);
    }

    #[tokio::test]
    async fn keeps_entries_on_or_after_cutoff() {
        let registry = CannedRegistry {
            responses: HashMap::from([(
                "GE",
                json!({ "list": [
                    entry("Before SA", "0106", "2026-10-11"),
                    entry("Boundary SA", "0106", "2026-10-12"),
                    entry("After SA", "0106", "2026-10-18"),
                    entry("Undated SA", "0106", ""),
                ]}),
            )]),
        };

        let report = RegistryFetcher::new(registry)
            .fetch(&["GE".to_string()], cutoff())
            .await;

        let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Boundary SA", "After SA"]);
        assert_eq!(
            report.regions[0].status,
            RegionStatus::Fetched {
                kept: 2,
                outside_window: 2,
                unsupported_form: 0,
            }
        );
    }

    #[tokio::test]
    async fn drops_other_legal_forms_and_tags_requested_canton() {
        let registry = CannedRegistry {
            responses: HashMap::from([(
                "VD",
                json!({ "list": [
                    entry("Cooperative", "Genossenschaft", "2026-10-15"),
                    entry("Bureau Sàrl", "0107", "2026-10-15"),
                ]}),
            )]),
        };

        let report = RegistryFetcher::new(registry)
            .fetch(&["VD".to_string()], cutoff())
            .await;

        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.legal_form, LegalForm::LimitedLiabilityCompany);
        assert_eq!(record.canton, "VD");
    }

    #[tokio::test]
    async fn failed_canton_is_reported_and_others_continue() {
        let registry = CannedRegistry {
            responses: HashMap::from([
                ("GE", json!({ "list": [entry("Genève SA", "0106", "2026-10-15")] })),
                ("FR", json!({ "list": [] })),
            ]),
        };
        let cantons = ["GE", "VD", "FR"].map(String::from);

        let report = RegistryFetcher::new(registry).fetch(&cantons, cutoff()).await;

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.regions.len(), 3);
        let failed: Vec<_> = report
            .failed_regions()
            .map(|region| region.canton.as_str())
            .collect();
        assert_eq!(failed, vec!["VD"]);
        assert_eq!(
            report.regions[2].status,
            RegionStatus::Fetched {
                kept: 0,
                outside_window: 0,
                unsupported_form: 0,
            }
        );
    }

    #[tokio::test]
    async fn malformed_payload_fails_only_that_canton() {
        let registry = CannedRegistry {
            responses: HashMap::from([
                ("GE", json!({ "list": "not a list" })),
                ("VD", json!([entry("Vaud SA", "SA", "2026-10-13")])),
            ]),
        };
        let cantons = ["GE", "VD"].map(String::from);

        let report = RegistryFetcher::new(registry).fetch(&cantons, cutoff()).await;

        assert!(report.regions[0].is_failed());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].canton, "VD");
    }

    #[test]
    fn region_report_serializes_flat() {
        let report = RegionReport {
            canton: "GE".to_string(),
            status: RegionStatus::Failed {
                reason: "timeout".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&report).expect("serialize"),
            json!({ "canton": "GE", "status": "failed", "reason": "timeout" })
        );
    }
}
