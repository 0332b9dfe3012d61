//! Artifact reference construction.
//!
//! The renderable artifact is a chart-service URL that encodes the current
//! display value as a QR code. The only contract with the service is a
//! syntactically valid request URL given (size, payload); whether the URL
//! resolves to an actual image is the consuming renderer's concern.

use url::form_urlencoded;

/// Chart service endpoint.
pub const CHART_ENDPOINT: &str = "https://chart.googleapis.com/chart";

/// Error-correction level and margin for the rendered code (high tier,
/// one-module margin).
const ERROR_CORRECTION: &str = "H|1";

/// A chart-service request for one display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    /// Width and height of the rendered artifact in pixels.
    pub size: u32,

    /// Display value to encode.
    pub payload: String,
}

impl ChartRequest {
    /// Build the request URL.
    ///
    /// Infallible pure string construction. The payload is form-encoded
    /// into the query, so any token survives the trip.
    pub fn url(&self) -> String {
        let dimensions = format!("{size}x{size}", size = self.size);

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("cht", "qr")
            .append_pair("chs", &dimensions)
            .append_pair("chl", &self.payload)
            .append_pair("chld", ERROR_CORRECTION)
            .finish();

        format!("{CHART_ENDPOINT}?{query}")
    }
}
