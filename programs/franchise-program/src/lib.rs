//! Franchise Investment Ledger Program
//!
//! On-chain ledger for fractional franchise investment: businesses and their
//! outlets live as PDAs, outlet shares are SPL tokens minted during a funding
//! window, and revenue deposits accrue into a per-outlet dividend pool that
//! holders claim proportionally.

use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{FranchiseStatus, VerificationTier};

declare_id!("Frch1111111111111111111111111111111111111111");

#[program]
pub mod franchise_program {
    use super::*;

    /// Initialize the platform configuration and fee vault
    pub fn initialize_platform(ctx: Context<InitializePlatform>, fee_bps: u16) -> Result<()> {
        instructions::initialize_platform::handler(ctx, fee_bps)
    }

    /// Update the platform fee or transfer the admin authority
    pub fn update_platform_config(
        ctx: Context<UpdatePlatformConfig>,
        new_fee_bps: Option<u16>,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_platform_config::handler(ctx, new_fee_bps, new_authority)
    }

    /// Register a new franchise brand under a unique slug
    pub fn create_business(
        ctx: Context<CreateBusiness>,
        name: String,
        slug: String,
        industry: String,
        category: String,
    ) -> Result<()> {
        instructions::create_business::handler(ctx, name, slug, industry, category)
    }

    /// Advance a business verification tier (platform admin only)
    pub fn set_verification_tier(
        ctx: Context<SetVerificationTier>,
        tier: VerificationTier,
    ) -> Result<()> {
        instructions::set_verification_tier::handler(ctx, tier)
    }

    /// Open a new outlet with its share mint and capital vault
    pub fn create_franchise(
        ctx: Context<CreateFranchise>,
        franchise_slug: String,
        location_address: String,
        building_name: String,
        carpet_area: u64,
        cost_per_area: u64,
        total_shares: u64,
    ) -> Result<()> {
        instructions::create_franchise::handler(
            ctx,
            franchise_slug,
            location_address,
            building_name,
            carpet_area,
            cost_per_area,
            total_shares,
        )
    }

    /// Buy outlet shares while the funding window is open
    pub fn invest_in_franchise(ctx: Context<InvestInFranchise>, shares_to_buy: u64) -> Result<()> {
        instructions::invest_in_franchise::handler(ctx, shares_to_buy)
    }

    /// Deposit outlet revenue into the dividend pool (owner only)
    pub fn distribute_revenue(ctx: Context<DistributeRevenue>, total_revenue: u64) -> Result<()> {
        instructions::distribute_revenue::handler(ctx, total_revenue)
    }

    /// Pay out the caller's claimable dividends against held shares
    pub fn claim_dividends(ctx: Context<ClaimDividends>) -> Result<()> {
        instructions::claim_dividends::handler(ctx)
    }

    /// Withdraw raised capital from the outlet vault (owner only)
    pub fn withdraw_capital(ctx: Context<WithdrawCapital>, amount: u64) -> Result<()> {
        instructions::withdraw_capital::handler(ctx, amount)
    }

    /// Move a franchise along its lifecycle state machine
    pub fn update_franchise_status(
        ctx: Context<UpdateFranchiseStatus>,
        new_status: FranchiseStatus,
    ) -> Result<()> {
        instructions::update_franchise_status::handler(ctx, new_status)
    }
}
