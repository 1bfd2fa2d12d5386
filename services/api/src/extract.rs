use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::{Path, PathBuf};
use zefix_leads::config::AppConfig;
use zefix_leads::error::AppError;
use zefix_leads::telemetry;
use zefix_leads::workflows::extraction::{ExtractionOutput, ExtractionRequest, ExtractionService};
use zefix_leads::workflows::registry::{RegionStatus, ZefixHttpClient};

#[derive(Args, Debug, Default)]
pub(crate) struct ExtractArgs {
    /// Canton code to query; repeat for several (defaults to the configured cantons)
    #[arg(long)]
    pub(crate) canton: Vec<String>,
    /// Lookback window in days (defaults to the configured window)
    #[arg(long)]
    pub(crate) days: Option<i64>,
    /// Extraction date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Destination file (defaults to the dated workbook name in the working directory)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

impl ExtractArgs {
    fn request(&self) -> ExtractionRequest {
        ExtractionRequest {
            cantons: (!self.canton.is_empty()).then(|| self.canton.clone()),
            days: self.days,
        }
    }
}

pub(crate) async fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let client = ZefixHttpClient::new(&config.registry)?;
    let service = ExtractionService::new(client, config.extraction);

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let output = service.run(args.request(), today).await?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&output.filename));
    tokio::fs::write(&path, &output.workbook).await?;

    println!("{}", render_summary(&output, &path));
    Ok(())
}

fn render_summary(output: &ExtractionOutput, path: &Path) -> String {
    let mut lines = vec![format!(
        "{} new companies written to {}",
        output.count(),
        path.display()
    )];

    for region in &output.regions {
        let line = match &region.status {
            RegionStatus::Fetched {
                kept,
                outside_window,
                unsupported_form,
            } => format!(
                "  {}: {kept} kept, {outside_window} outside window, {unsupported_form} other legal forms",
                region.canton
            ),
            RegionStatus::Failed { reason } => format!("  {}: failed ({reason})", region.canton),
        };
        lines.push(line);
    }

    lines.join("\n")
}
