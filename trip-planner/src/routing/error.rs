//! Routing client error types.

/// Errors from the routing engine or the transport in front of it.
///
/// A "no route" answer is not an error; the adapter turns it into an
/// empty `RouteResult`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RoutingError {
    /// The RPC failed with a non-success status
    #[error("routing RPC failed ({code:?}): {message}")]
    Transport { code: tonic::Code, message: String },

    /// The engine answered but reported an error in the payload
    #[error("routing engine error: {0}")]
    Engine(String),

    /// The configured server address cannot be used
    #[error("invalid routing server address {address}: {message}")]
    InvalidAddress { address: String, message: String },
}

impl From<tonic::Status> for RoutingError {
    fn from(status: tonic::Status) -> Self {
        RoutingError::Transport {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}
