//! Shared fixtures for qr-core integration tests.

use qr_core::{DecoderSettings, EncodedImage, QrServerClient, RetryPolicy, encode};

use models::{Color, EncodeRequestBuilder, ErrorCorrectionLevel};

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use image::{Rgb, RgbImage, imageops};
use serde_json::{Value, json};
use wiremock::{Match, MockServer, Request};

pub const READ_PATH: &str = "/v1/read-qr-code/";

pub fn fast_settings(max_retries: u32) -> DecoderSettings {
    DecoderSettings {
        timeout: Duration::from_secs(5),
        retry: RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(10),
        },
    }
}

pub fn client_for(server: &MockServer, settings: DecoderSettings) -> QrServerClient {
    QrServerClient::new(&format!("{}{READ_PATH}", server.uri()), settings)
        .expect("mock endpoint is a valid URL")
}

/// Endpoint on a port nobody listens on.
pub fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{READ_PATH}")
}

/// Endpoint that answers one request with `status` and a body cut short of
/// its declared `Content-Length`, so reading the body fails.
pub fn truncated_body_endpoint(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        stream
            .set_read_timeout(Some(Duration::from_millis(300)))
            .expect("set read timeout");

        // Drain the upload until the client goes quiet.
        let mut buffer = [0u8; 8192];
        while matches!(stream.read(&mut buffer), Ok(n) if n > 0) {}

        let response = format!(
            "HTTP/1.1 {status} Error\r\nContent-Type: text/plain\r\nContent-Length: 64\r\nConnection: close\r\n\r\ncut"
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    format!("http://127.0.0.1:{port}{READ_PATH}")
}

pub fn encode_text(payload: &str, level: ErrorCorrectionLevel) -> EncodedImage {
    let request = EncodeRequestBuilder::default()
        .with_payload(payload)
        .with_foreground(Color::BLACK)
        .with_background(Color::WHITE)
        .with_error_correction(level)
        .build()
        .expect("non-empty payload");
    encode(&request).expect("payload fits")
}

/// Two symbols side by side on one white canvas.
pub fn side_by_side(left: &EncodedImage, right: &EncodedImage) -> RgbImage {
    let (lw, lh) = left.image().dimensions();
    let (rw, rh) = right.image().dimensions();
    let mut canvas = RgbImage::from_pixel(lw + rw, lh.max(rh), Rgb([255, 255, 255]));
    imageops::replace(&mut canvas, left.image(), 0, 0);
    imageops::replace(&mut canvas, right.image(), i64::from(lw), 0);
    canvas
}

/// Read every QR symbol in `image` with a local, independent reader.
pub fn read_symbols(image: &RgbImage) -> Vec<String> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let Rgb([r, g, b]) = *image.get_pixel(x as u32, y as u32);
            ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
        },
    );

    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|grid| grid.decode().ok())
        .map(|(_, content)| content)
        .collect()
}

pub fn found(payloads: &[&str]) -> Value {
    let symbols: Vec<Value> = payloads
        .iter()
        .enumerate()
        .map(|(seq, data)| json!({"seq": seq, "data": data, "error": null}))
        .collect();
    json!([{"type": "qrcode", "symbol": symbols}])
}

pub fn not_found() -> Value {
    json!([{"type": "qrcode", "symbol": [
        {"seq": 0, "data": null, "error": "could not find/read QR Code"}
    ]}])
}

/// Matches a multipart upload carrying a PNG in the `file` field.
pub struct PngUpload;

impl Match for PngUpload {
    fn matches(&self, request: &Request) -> bool {
        let is_multipart = request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        is_multipart
            && contains(&request.body, br#"name="file"; filename="qrcode.png""#)
            && contains(&request.body, b"\x89PNG\r\n\x1a\n")
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
