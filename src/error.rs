//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction data could not be read.
    ///
    /// This covers an unreadable file or stream, a header that is missing one
    /// of the required columns, and rows with a missing or malformed
    /// quantity or unit price.
    #[error("could not load transaction data: {0}")]
    DataLoad(String),

    /// The date and time of a row could not be combined into a timestamp.
    ///
    /// `row` is the 1-based data row number (the header is not counted) and
    /// `value` is the offending "date time" text.
    #[error("could not parse the timestamp \"{value}\" on row {row}")]
    Parse {
        /// The 1-based data row number.
        row: u64,
        /// The date and time text that failed to parse.
        value: String,
    },

    /// A ranking was requested for a dimension that is not supported.
    #[error("\"{0}\" is not a supported sales dimension")]
    InvalidDimension(String),

    /// A month filter outside of 0-12 was requested.
    #[error("{0} is not a valid month, expected 0 (all months) or 1-12")]
    InvalidMonth(u8),

    /// The query string of a request could not be decoded.
    #[error("could not read the query string: {0}")]
    InvalidQuery(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::DataLoad(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::DataLoad(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidDimension(_) | Error::InvalidMonth(_) | Error::InvalidQuery(_) => {
                self.into_alert_response()
            }
            Error::DataLoad(_) | Error::Parse { .. } => {
                tracing::error!("Transaction data is unavailable: {self}");
                InternalServerError {
                    description: "Sales data unavailable",
                    fix: "The transaction data could not be loaded. Check the server logs.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = self.into_status_and_alert();

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into an HTTP response with a JSON body of the form
    /// `{"error": "..."}`.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {self}");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status_code, body).into_response()
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidDimension(_) | Error::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into the status code and alert to show inline on a page.
    pub(crate) fn into_status_and_alert(self) -> (StatusCode, Alert) {
        let status_code = self.status_code();

        let alert = match self {
            Error::InvalidMonth(month) => Alert::Error {
                message: "Invalid month".to_owned(),
                details: format!(
                    "{month} is not a valid month. Showing sales for all months instead."
                ),
            },
            Error::InvalidQuery(reason) => Alert::Error {
                message: "Invalid month".to_owned(),
                details: format!("{reason}. Showing sales for all months instead."),
            },
            Error::InvalidDimension(dimension) => Alert::Error {
                message: "Invalid sales dimension".to_owned(),
                details: format!(
                    "Sales cannot be grouped by \"{dimension}\". Use product_category, \
                    product_type or store_location."
                ),
            },
            _ => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            },
        };

        (status_code, alert)
    }
}
