//! Environment-first client configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::Cluster;

use crate::error::ClientError;

pub const RPC_URL_ENV: &str = "FRANCHISE_RPC_URL";
pub const PROGRAM_ID_ENV: &str = "FRANCHISE_PROGRAM_ID";
pub const KEYPAIR_ENV: &str = "FRANCHISE_KEYPAIR";
pub const COMMITMENT_ENV: &str = "FRANCHISE_COMMITMENT";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub cluster: Cluster,
    pub program_id: Pubkey,
    pub keypair_path: PathBuf,
    pub commitment: CommitmentConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self {
            cluster: Cluster::Localnet,
            program_id: franchise_program::ID,
            keypair_path: PathBuf::from(home).join(".config/solana/id.json"),
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

impl ClientConfig {
    /// Read overrides from the environment, loading `.env` first
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(value) = env::var(RPC_URL_ENV) {
            config.cluster = Cluster::from_str(&value).map_err(|err| {
                ClientError::Unavailable(format!("bad {RPC_URL_ENV} value {value:?}: {err}"))
            })?;
        }

        if let Ok(value) = env::var(PROGRAM_ID_ENV) {
            config.program_id = value.parse().map_err(|err| {
                ClientError::Unavailable(format!("bad {PROGRAM_ID_ENV} value {value:?}: {err}"))
            })?;
        }

        if let Ok(value) = env::var(KEYPAIR_ENV) {
            config.keypair_path = PathBuf::from(value);
        }

        if let Ok(value) = env::var(COMMITMENT_ENV) {
            config.commitment = parse_commitment(&value)?;
        }

        Ok(config)
    }
}

fn parse_commitment(value: &str) -> Result<CommitmentConfig, ClientError> {
    match value {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(ClientError::Unavailable(format!(
            "bad {COMMITMENT_ENV} value {other:?}, expected processed|confirmed|finalized"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_localnet_and_the_bundled_program() {
        let config = ClientConfig::default();
        assert_eq!(config.cluster, Cluster::Localnet);
        assert_eq!(config.program_id, franchise_program::ID);
        assert_eq!(config.commitment, CommitmentConfig::confirmed());
    }

    #[test]
    fn commitment_parsing() {
        assert_eq!(
            parse_commitment("finalized").unwrap(),
            CommitmentConfig::finalized()
        );
        assert!(parse_commitment("tentative").is_err());
    }

    #[test]
    fn cluster_accepts_monikers_and_urls() {
        assert_eq!(Cluster::from_str("devnet").unwrap(), Cluster::Devnet);
        assert!(matches!(
            Cluster::from_str("http://127.0.0.1:8899").unwrap(),
            Cluster::Custom(_, _)
        ));
    }
}
