use serde::Deserialize;

use crate::config::{is_swiss_canton, ExtractionDefaults, MAX_LOOKBACK_DAYS};

/// JSON body accepted by the extraction endpoint. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default)]
    pub cantons: Option<Vec<String>>,
    #[serde(default)]
    pub days: Option<i64>,
}

/// A request after defaults and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPlan {
    pub cantons: Vec<String>,
    pub lookback_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("unknown canton code '{0}'")]
    UnknownCanton(String),
    #[error("days must be between 0 and {}, got {0}", MAX_LOOKBACK_DAYS)]
    DaysOutOfRange(i64),
}

impl ExtractionRequest {
    /// Decode a raw request body. A blank body asks for every default.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|err| RequestError::MalformedBody(err.to_string()))
    }

    pub fn resolve(self, defaults: &ExtractionDefaults) -> Result<ExtractionPlan, RequestError> {
        let lookback_days = match self.days {
            None => defaults.lookback_days,
            Some(days) => u32::try_from(days)
                .ok()
                .filter(|days| *days <= MAX_LOOKBACK_DAYS)
                .ok_or(RequestError::DaysOutOfRange(days))?,
        };

        let requested = self.cantons.unwrap_or_else(|| defaults.cantons.clone());
        let mut cantons: Vec<String> = Vec::with_capacity(requested.len());
        for raw in requested {
            let code = raw.trim().to_ascii_uppercase();
            if !is_swiss_canton(&code) {
                return Err(RequestError::UnknownCanton(raw));
            }
            if !cantons.contains(&code) {
                cantons.push(code);
            }
        }

        Ok(ExtractionPlan {
            cantons,
            lookback_days,
        })
    }
}
