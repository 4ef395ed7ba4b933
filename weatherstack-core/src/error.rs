use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures while retrieving the raw payload.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to weatherstack: {0}")]
    Network(#[source] reqwest::Error),

    #[error("weatherstack request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to read weatherstack response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("weatherstack returned an empty response body")]
    EmptyBody,

    #[error("weatherstack response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Failures while turning the payload into a [`crate::WeatherResponse`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to parse weatherstack JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected weatherstack response shape: expected an object, found {found}")]
    UnexpectedShape { found: &'static str },

    #[error("weatherstack API error {code} ({kind}): {info}")]
    Api { code: i64, kind: String, info: String },
}

/// The decoded payload is well-formed but lacks data the report needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("Field `{field}` is empty, expected at least one entry")]
    EmptyList { field: &'static str },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Failed to write weather report: {0}")]
    Io(#[from] io::Error),
}
