//! Error types shared by the outbound clients.
//!
//! These cover failures while constructing infrastructure (HTTP clients, provider
//! credentials). Request-time failures have their own types in `generation` and `fetch`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),
}
