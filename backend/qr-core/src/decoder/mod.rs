//! Client for the remote QR recognition service.
//!
//! The image is re-encoded as PNG and posted as a multipart `file` field.
//! Each attempt has a hard timeout and transient failures are retried a
//! bounded number of times with exponential backoff.

mod response;

pub(crate) use response::parse_read_response;

use crate::QRSERVER_READ_ENDPOINT;
use crate::encoder::EncodedImage;
use crate::error::DecodeError;

use common::{ErrorLocation, HttpStatusCode};
use models::DecodedSymbols;

use std::io::Cursor;
use std::panic::Location;
use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use image::{DynamicImage, ImageFormat, RgbImage};
use log::{debug, info, warn};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tokio::time::sleep as TokioSleep;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 1;
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const UPLOAD_FIELD_NAME: &str = "file";
const UPLOAD_FILE_NAME: &str = "qrcode.png";
const UPLOAD_MIME_TYPE: &str = "image/png";

/// An image queued for recognition, normalized to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    image: RgbImage,
}

impl DecodeRequest {
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    /// Decode an uploaded file body (png, jpeg, ...).
    #[track_caller]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    #[track_caller]
    pub fn to_png(&self) -> Result<Vec<u8>, DecodeError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl From<&EncodedImage> for DecodeRequest {
    fn from(encoded: &EncodedImage) -> Self {
        Self {
            image: encoded.image().clone(),
        }
    }
}

/// How many times, and how patiently, to retry transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_backoff,
            initial_interval: self.initial_backoff,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderSettings {
    /// Per-attempt limit covering connect, upload and response body.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_DURATION,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QrServerClient {
    endpoint: Url,
    client: Client,
    retry: RetryPolicy,
}

impl QrServerClient {
    #[track_caller]
    pub fn new(endpoint: &str, settings: DecoderSettings) -> Result<Self, DecodeError> {
        let endpoint = Url::parse(endpoint)?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(DecodeError::InvalidEndpoint {
                message: format!("Unsupported scheme in {endpoint}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DecodeError::InvalidEndpoint {
                message: format!("Failed to build HTTP client: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            endpoint,
            client,
            retry: settings.retry,
        })
    }

    /// Client for the public qrserver.com endpoint with default settings.
    pub fn public() -> Result<Self, DecodeError> {
        Self::new(QRSERVER_READ_ENDPOINT, DecoderSettings::default())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `request` to the recognition service and return every payload it
    /// found.
    ///
    /// An image without a QR symbol is not an error: the result is simply
    /// empty.
    ///
    /// # Errors
    ///
    /// * [`DecodeError::Network`] - unreachable or timed out (after retries)
    /// * [`DecodeError::Service`] - non-2xx status (after retries for 429/5xx gateways)
    /// * [`DecodeError::Parse`] - 2xx with a body that is not the expected JSON
    /// * [`DecodeError::Image`] - the image could not be serialized as PNG
    pub async fn decode(&self, request: &DecodeRequest) -> Result<DecodedSymbols, DecodeError> {
        let png = request.to_png()?;
        let mut backoff = self.retry.backoff();
        let mut attempt: u32 = 0;

        debug!(
            "Uploading {} PNG bytes to {}",
            png.len(),
            self.endpoint.as_str()
        );

        loop {
            attempt += 1;

            let error = match self.send_once(png.clone()).await {
                Ok(symbols) => {
                    info!(
                        "Recognition service found {} symbol(s) on attempt {attempt}",
                        symbols.len()
                    );
                    return Ok(symbols);
                }
                Err(error) => error,
            };

            if !error.is_transient() || attempt > self.retry.max_retries {
                warn!("Decode failed on attempt {attempt}: {error}");
                return Err(error);
            }

            match backoff.next_backoff() {
                Some(delay) => {
                    warn!("Decode attempt {attempt} failed, retrying after {delay:?}: {error}");
                    TokioSleep(delay).await;
                }
                None => return Err(error),
            }
        }
    }

    async fn send_once(&self, png: Vec<u8>) -> Result<DecodedSymbols, DecodeError> {
        let part = Part::bytes(png)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME_TYPE)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = HttpStatusCode::from(response.status().as_u16());

        if !status.is_success() {
            return Err(DecodeError::Service {
                status,
                message: response.text().await.unwrap_or_else(|e| {
                    debug!("Failed to read body of HTTP {status} response: {e}");
                    String::new()
                }),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response.bytes().await?;
        parse_read_response(&body)
    }
}
