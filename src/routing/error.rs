use thiserror::Error;

/// Failure to resolve a request to a downstream route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The upstream path is empty or does not start with `/`.
    #[error("malformed upstream path {0:?}: must start with '/'")]
    MalformedPath(String),

    /// No configured route accepts the request.
    #[error("no route found for {method} {path}")]
    NoRouteFound { method: String, path: String },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
