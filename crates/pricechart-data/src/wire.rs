//! Wire format of `GET /history`.

use pricechart_core::{Candle, Series};
use serde::Deserialize;

use crate::error::FetchError;

/// Status marker of an error envelope.
pub const STATUS_ERROR: &str = "error";

/// Fallback message for error envelopes without `errmsg`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of a history response.
///
/// Success: `{"s":"ok","t":[..],"o":[..],"h":[..],"l":[..],"c":[..],"v":[..]}`.
/// Failure: `{"s":"error","errmsg":".."}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename = "s", default)]
    pub status: Option<String>,
    #[serde(rename = "errmsg", default)]
    pub error: Option<String>,
    #[serde(rename = "t", default)]
    pub times: Option<Vec<i64>>,
    #[serde(rename = "o", default)]
    pub opens: Option<Vec<f64>>,
    #[serde(rename = "h", default)]
    pub highs: Option<Vec<f64>>,
    #[serde(rename = "l", default)]
    pub lows: Option<Vec<f64>>,
    #[serde(rename = "c", default)]
    pub closes: Option<Vec<f64>>,
    #[serde(rename = "v", default)]
    pub volumes: Option<Vec<f64>>,
}

impl HistoryResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ERROR)
    }

    /// Zip the parallel arrays into a [`Series`].
    ///
    /// Error envelopes become [`FetchError::Server`]. Missing arrays and
    /// arrays whose length differs from `t` are rejected rather than
    /// truncated.
    pub fn into_series(self) -> Result<Series, FetchError> {
        if self.is_error() {
            return Err(FetchError::Server {
                message: self.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            });
        }

        let times = self.times.ok_or(FetchError::MissingField("t"))?;
        let opens = require("o", self.opens, times.len())?;
        let highs = require("h", self.highs, times.len())?;
        let lows = require("l", self.lows, times.len())?;
        let closes = require("c", self.closes, times.len())?;
        let volumes = require("v", self.volumes, times.len())?;

        let candles = times
            .into_iter()
            .enumerate()
            .map(|(i, t)| Candle::new(t, opens[i], highs[i], lows[i], closes[i], volumes[i]))
            .collect::<Vec<_>>();

        Ok(Series::new(candles))
    }
}

fn require(
    field: &'static str,
    values: Option<Vec<f64>>,
    expected: usize,
) -> Result<Vec<f64>, FetchError> {
    let values = values.ok_or(FetchError::MissingField(field))?;
    if values.len() != expected {
        return Err(FetchError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}
