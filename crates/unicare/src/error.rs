use crate::access::UnknownRole;
use crate::config::ConfigError;
use crate::modules::aid::AmountError;
use crate::modules::career::CatalogueError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalogue(CatalogueError),
    Access(UnknownRole),
    Amount(AmountError),
    Validation(String),
    DemoModeDisabled,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalogue(err) => write!(f, "catalogue error: {}", err),
            AppError::Access(err) => write!(f, "access error: {}", err),
            AppError::Amount(err) => write!(f, "invalid amount: {}", err),
            AppError::Validation(message) => write!(f, "validation error: {}", message),
            AppError::DemoModeDisabled => {
                write!(f, "no database backend is configured; enable APP_DEMO_MODE")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalogue(err) => Some(err),
            AppError::Access(err) => Some(err),
            AppError::Amount(err) => Some(err),
            AppError::Validation(_) | AppError::DemoModeDisabled => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Access(_) | AppError::Amount(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::DemoModeDisabled => StatusCode::NOT_IMPLEMENTED,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalogue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogueError> for AppError {
    fn from(value: CatalogueError) -> Self {
        Self::Catalogue(value)
    }
}

impl From<UnknownRole> for AppError {
    fn from(value: UnknownRole) -> Self {
        Self::Access(value)
    }
}

impl From<AmountError> for AppError {
    fn from(value: AmountError) -> Self {
        Self::Amount(value)
    }
}
