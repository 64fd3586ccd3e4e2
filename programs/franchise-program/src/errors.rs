//! Error definitions for the franchise investment ledger

use anchor_lang::prelude::*;

#[error_code]
pub enum FranchiseError {
    #[msg("Unauthorized: only the expected signer can perform this action")]
    Unauthorized,

    #[msg("Business name is too long (max 64 characters)")]
    NameTooLong,

    #[msg("Slug is too long (max 32 characters)")]
    SlugTooLong,

    #[msg("Slug must be non-empty lowercase alphanumeric with hyphens")]
    InvalidSlug,

    #[msg("Industry label is too long (max 32 characters)")]
    IndustryTooLong,

    #[msg("Category label is too long (max 32 characters)")]
    CategoryTooLong,

    #[msg("Location address is too long (max 128 characters)")]
    LocationTooLong,

    #[msg("Building name is too long (max 64 characters)")]
    BuildingNameTooLong,

    #[msg("Platform fee must not exceed 10000 basis points")]
    InvalidFeeBps,

    #[msg("Carpet area must be greater than zero")]
    InvalidCarpetArea,

    #[msg("Cost per unit area must be greater than zero")]
    InvalidCostPerArea,

    #[msg("Total share count must be greater than zero")]
    InvalidShareSupply,

    #[msg("Share supply exceeds total investment, per-share price would be zero")]
    ShareSupplyExceedsInvestment,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Franchise is not in funding status")]
    NotInFundingStatus,

    #[msg("Share amount must be greater than zero")]
    InvalidShareAmount,

    #[msg("Insufficient shares available")]
    InsufficientSharesAvailable,

    #[msg("Token mint does not match the franchise share mint")]
    InvalidMint,

    #[msg("Franchise does not accept revenue in its current status")]
    RevenueNotAccepted,

    #[msg("Revenue amount must be greater than zero")]
    InvalidRevenueAmount,

    #[msg("Caller holds no franchise shares")]
    ZeroShareBalance,

    #[msg("No dividends claimable for this position")]
    NothingToClaim,

    #[msg("Capital cannot be withdrawn while funding is open")]
    FundingStillOpen,

    #[msg("Withdrawal amount must be greater than zero")]
    InvalidWithdrawalAmount,

    #[msg("Withdrawal exceeds the recoverable capital")]
    WithdrawalExceedsRecoverable,

    #[msg("Invalid franchise status transition")]
    InvalidStatusTransition,

    #[msg("Verification tier can only be advanced")]
    TierChangeNotAllowed,
}
