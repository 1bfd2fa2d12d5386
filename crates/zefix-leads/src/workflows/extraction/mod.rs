//! End-to-end extraction: validate the request, fetch every canton, rank the
//! companies and render the workbook.

mod request;
pub mod router;

use base64::Engine as _;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::ExtractionDefaults;
use crate::error::AppError;
use crate::workflows::companies::{prioritize, CompanyRecord};
use crate::workflows::registry::{cutoff_date, RegionReport, RegistryClient, RegistryFetcher};
use crate::workflows::workbook::{render_workbook, workbook_filename};

pub use request::{ExtractionPlan, ExtractionRequest, RequestError};
pub use router::extraction_router;

pub struct ExtractionService<C> {
    fetcher: RegistryFetcher<C>,
    defaults: ExtractionDefaults,
}

impl<C> ExtractionService<C>
where
    C: RegistryClient,
{
    pub fn new(client: C, defaults: ExtractionDefaults) -> Self {
        Self {
            fetcher: RegistryFetcher::new(client),
            defaults,
        }
    }

    /// Run one extraction as of `today`.
    pub async fn run(
        &self,
        request: ExtractionRequest,
        today: NaiveDate,
    ) -> Result<ExtractionOutput, AppError> {
        let plan = request.resolve(&self.defaults)?;
        let cutoff = cutoff_date(today, plan.lookback_days);
        info!(cantons = ?plan.cantons, %cutoff, "starting extraction");

        let report = self.fetcher.fetch(&plan.cantons, cutoff).await;
        let records = prioritize(report.records);
        let workbook = render_workbook(&records)?;

        info!(
            count = records.len(),
            failed_cantons = report.regions.iter().filter(|r| r.is_failed()).count(),
            "extraction finished"
        );

        Ok(ExtractionOutput {
            filename: workbook_filename(today),
            records,
            regions: report.regions,
            workbook,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionOutput {
    pub records: Vec<CompanyRecord>,
    pub regions: Vec<RegionReport>,
    pub workbook: Vec<u8>,
    pub filename: String,
}

impl ExtractionOutput {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn into_response_body(self) -> ExtractionResponse {
        ExtractionResponse {
            success: true,
            count: self.records.len(),
            data: base64::engine::general_purpose::STANDARD.encode(&self.workbook),
            filename: self.filename,
            regions: self.regions,
        }
    }
}

/// Success envelope returned to HTTP callers.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResponse {
    pub success: bool,
    pub count: usize,
    pub filename: String,
    /// Base64-encoded `.xlsx` bytes.
    pub data: String,
    pub regions: Vec<RegionReport>,
}
