//! Instruction handlers for the franchise investment ledger

pub mod claim_dividends;
pub mod create_business;
pub mod create_franchise;
pub mod distribute_revenue;
pub mod initialize_platform;
pub mod invest_in_franchise;
pub mod set_verification_tier;
pub mod update_franchise_status;
pub mod update_platform_config;
pub mod withdraw_capital;

pub use claim_dividends::*;
pub use create_business::*;
pub use create_franchise::*;
pub use distribute_revenue::*;
pub use initialize_platform::*;
pub use invest_in_franchise::*;
pub use set_verification_tier::*;
pub use update_franchise_status::*;
pub use update_platform_config::*;
pub use withdraw_capital::*;
