//! Off-chain client for the franchise investment ledger
//!
//! Derives the program's account addresses, submits instructions exactly
//! once, and reads ledger state, with arithmetic and activity-feed
//! capabilities injected at construction.

pub mod client;
pub mod config;
pub mod error;
pub mod math;
pub mod pda;
pub mod repository;

pub use client::{estimate_claimable, estimate_investment_cost, FranchiseClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use math::{IntegerMath, SafeMath, WideMath, MAX_SAFE_INTEGER};
pub use repository::{
    ChainFranchiseRepository, FranchiseRepository, MemoryFranchiseRepository,
    MemoryTransactionRepository, TransactionKind, TransactionRecord, TransactionRepository,
};

pub use franchise_program::state::{
    Business, Franchise, FranchiseStatus, InvestorPosition, Platform, VerificationTier,
};
