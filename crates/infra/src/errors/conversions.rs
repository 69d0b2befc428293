//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use vaultdetect_domain::{DetectError, TransportStage};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DetectError);

impl From<InfraError> for DetectError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DetectError> for InfraError {
    fn from(value: DetectError) -> Self {
        InfraError(value)
    }
}

impl InfraError {
    /// Map a reqwest failure raised while serving `stage`.
    pub fn http(err: HttpError, stage: TransportStage) -> Self {
        InfraError(err.into_detect(stage))
    }
}

/// Conversion that needs to know which call failed.
///
/// Status rejections never reach here: the transport hands every status back
/// to the 2xx gate in core, so only delivery failures are classified.
trait IntoDetectError {
    fn into_detect(self, stage: TransportStage) -> DetectError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DetectError */
/* -------------------------------------------------------------------------- */

impl IntoDetectError for HttpError {
    fn into_detect(self, stage: TransportStage) -> DetectError {
        if self.is_timeout() {
            return DetectError::Network { stage, message: "HTTP request timed out".into() };
        }

        if self.is_connect() {
            return DetectError::Network { stage, message: format!("HTTP connection failure: {self}") };
        }

        if self.is_builder() {
            return DetectError::Network { stage, message: format!("invalid HTTP request: {self}") };
        }

        if self.is_body() || self.is_decode() {
            return DetectError::Network {
                stage,
                message: format!("failed to read HTTP response body: {self}"),
            };
        }

        DetectError::Network { stage, message: self.to_string() }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
