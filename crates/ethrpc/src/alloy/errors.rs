use alloy::transports::{RpcError, TransportError};

pub trait RpcErrorExt {
    /// Returns whether the node answered but reported that the transaction
    /// or call reverted.
    fn is_revert(&self) -> bool;

    /// Returns whether the request never got a proper answer from the node
    /// (connection refused, dropped, timed out, garbage response).
    fn is_connection_error(&self) -> bool;
}

impl RpcErrorExt for TransportError {
    fn is_revert(&self) -> bool {
        match self {
            // Some nodes attach the revert data, others only say so in the
            // message (e.g. hardhat for a revert without reason).
            RpcError::ErrorResp(err) => {
                let has_revert_data = err.as_revert_data().is_some();
                tracing::debug!(?err, %has_revert_data, "node error response");
                has_revert_data || err.message.contains("revert")
            }
            _ => false,
        }
    }

    fn is_connection_error(&self) -> bool {
        matches!(
            self,
            RpcError::Transport(_) | RpcError::DeserError { .. } | RpcError::NullResp
        )
    }
}

/// Short human readable description of where a failed request went wrong.
pub fn describe(err: &TransportError) -> &'static str {
    if err.is_revert() {
        "transaction reverted"
    } else if err.is_connection_error() {
        "lost connection to node"
    } else {
        "node rejected request"
    }
}
