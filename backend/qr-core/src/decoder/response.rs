//! Wire format of the recognition service.
//!
//! ```json
//! [{"type":"qrcode","symbol":[{"seq":0,"data":"hello","error":null}]}]
//! ```
//!
//! When nothing is found the service still answers 200, with a symbol whose
//! `data` is null and whose `error` explains why.

use crate::error::DecodeError;

use models::DecodedSymbols;

use log::debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ReadResult {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub symbol: Vec<ReadSymbol>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReadSymbol {
    #[serde(default)]
    pub seq: Option<u32>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Parse a response body into the payloads it reports, in order.
#[track_caller]
pub(crate) fn parse_read_response(body: &[u8]) -> Result<DecodedSymbols, DecodeError> {
    let results: Vec<ReadResult> = serde_json::from_slice(body)?;

    let mut payloads = Vec::new();
    for result in results {
        for symbol in result.symbol {
            match (symbol.data, symbol.error) {
                (Some(data), _) => payloads.push(data),
                (None, Some(reason)) => {
                    debug!(
                        "Service reported no data for {} symbol {:?}: {reason}",
                        result.kind.as_deref().unwrap_or("unknown"),
                        symbol.seq
                    );
                }
                (None, None) => {}
            }
        }
    }

    Ok(DecodedSymbols::new(payloads))
}
