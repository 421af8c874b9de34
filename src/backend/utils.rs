use reqwest::Response;
use tracing::error;

use crate::error::{FitcheckError, Result};

/// Convert a reqwest error to a FitcheckError, handling timeout errors specially.
pub fn handle_http_error(e: reqwest::Error, provider_name: &str) -> FitcheckError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    if e.is_timeout() {
        FitcheckError::Timeout
    } else {
        FitcheckError::HttpError(e)
    }
}

/// Check HTTP response status and extract error message if unsuccessful.
pub async fn check_response_status(response: Response, provider_name: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.map_err(|e| handle_http_error(e, provider_name))?;
        error!(
            status = %status,
            error = %error_text,
            "{} API returned error response", provider_name
        );
        return Err(FitcheckError::ApiError(format!(
            "{} API error ({}): {}",
            provider_name, status, error_text
        )));
    }
    Ok(response)
}
