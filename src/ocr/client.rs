//! Blocking client for the image analysis endpoint.
//!
//! Either the provider's read API or the relay function in front of it can
//! be configured; both take the raw image bytes and return the same JSON.

use anyhow::{Context, Result, anyhow};
use image::ImageFormat;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::document::OcrDocument;
use crate::log;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// OCR endpoint settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Relay or provider URL the image is POSTed to
    pub endpoint: String,
    /// Environment variable holding the provider key. Not needed for a relay.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7071/api/ocr".to_string(),
            api_key_env: "GAKUMAS_OCR_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

pub struct OcrClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OcrClient {
    /// Builds a client, reading the key from the configured environment
    /// variable if it is set.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::new(&config.endpoint, api_key, Duration::from_secs(config.timeout_secs))
    }

    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        if endpoint.trim().is_empty() {
            return Err(anyhow!("OCR endpoint is not configured"));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }

    /// Sends the image and decodes the OCR result.
    pub fn analyze(&self, image: &[u8]) -> Result<OcrDocument> {
        let format = ensure_image(image)?;
        log(&format!(
            "Sending {:?} image ({} bytes) to {}",
            format,
            image.len(),
            self.endpoint
        ));

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec());
        if let Some(key) = &self.api_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        let response = request.send().context("OCR request failed")?;
        let status = response.status();
        let body = response.text().context("Failed to read OCR response")?;

        if !status.is_success() {
            return Err(anyhow!("OCR endpoint returned HTTP {}: {}", status, body));
        }

        parse_response(&body)
    }
}

/// Rejects input that is not a recognizable image before any request is made.
pub fn ensure_image(bytes: &[u8]) -> Result<ImageFormat> {
    if bytes.is_empty() {
        return Err(anyhow!("Image is empty"));
    }
    image::guess_format(bytes).context("Input is not a supported image")
}

/// Decodes a provider response body.
pub fn parse_response(body: &str) -> Result<OcrDocument> {
    let doc = OcrDocument::from_json(body).context("Unexpected OCR response format")?;
    log(&format!(
        "OCR response: model {}, {}x{}, {} block(s)",
        doc.model_version,
        doc.metadata.width,
        doc.metadata.height,
        doc.read_result.blocks.len()
    ));
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_ensure_image_accepts_png() {
        assert_eq!(ensure_image(PNG_HEADER).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_ensure_image_accepts_jpeg() {
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(ensure_image(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_ensure_image_rejects_text() {
        assert!(ensure_image(b"{\"not\": \"an image\"}").is_err());
        assert!(ensure_image(&[]).is_err());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(OcrClient::new("  ", None, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_analyze_rejects_non_image_without_request() {
        // Port 9 (discard) is never contacted: the input check fails first
        let client = OcrClient::new("http://127.0.0.1:9/api/ocr", None, Duration::from_secs(1))
            .unwrap();
        let err = client.analyze(b"plain text").unwrap_err();
        assert!(err.to_string().contains("not a supported image"));
    }

    #[test]
    fn test_parse_response_error_body() {
        assert!(parse_response(r#"{"error": {"code": "401"}}"#).is_err());
    }

    #[test]
    fn test_parse_response_ok() {
        let doc = parse_response(
            r#"{"modelVersion": "x", "metadata": {"width": 1, "height": 2},
                "readResult": {"blocks": []}}"#,
        )
        .unwrap();
        assert_eq!(doc.metadata.height, 2);
    }

    #[test]
    fn test_config_defaults() {
        let config: OcrConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_key_env, "GAKUMAS_OCR_KEY");
    }
}
