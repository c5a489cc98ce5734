use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} returned no usable result")]
    EmptyResponse(&'static str),

    #[error("no API key configured for {0}")]
    MissingKey(&'static str),
}

pub type ApiResult<T> = Result<T, ApiError>;
