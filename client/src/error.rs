//! Client error types
//!
//! Ledger rejections pass through verbatim from the program; setup problems
//! are their own variants so call sites can tell an unavailable client from
//! a failed call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The client could not be constructed (bad keypair, cluster, or program id)
    #[error("client unavailable: {0}")]
    Unavailable(String),

    /// Integer arithmetic left the representable range
    #[error("integer math overflow computing {0}")]
    Math(&'static str),

    /// A submitted transaction or typed account fetch failed
    #[error(transparent)]
    Program(#[from] anchor_client::ClientError),

    /// A raw RPC query failed
    #[error(transparent)]
    Rpc(#[from] anchor_client::solana_client::client_error::ClientError),

    /// Account data was present but not decodable as the expected type
    #[error("could not decode {0}: {1}")]
    Decode(&'static str, anchor_client::anchor_lang::error::Error),
}
