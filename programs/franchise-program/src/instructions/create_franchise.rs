//! Open a new franchise outlet under a business

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::errors::FranchiseError;
use crate::state::{
    Business, Franchise, FranchiseStatus, Platform, MAX_BUILDING_LEN, MAX_LOCATION_LEN,
};

#[derive(Accounts)]
#[instruction(franchise_slug: String)]
pub struct CreateFranchise<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Business::SEED, business.slug.as_bytes()],
        bump = business.bump
    )]
    pub business: Account<'info, Business>,

    #[account(
        init,
        payer = owner,
        space = 8 + Franchise::INIT_SPACE,
        seeds = [Franchise::SEED, business.key().as_ref(), franchise_slug.as_bytes()],
        bump
    )]
    pub franchise: Account<'info, Franchise>,

    /// Share mint for this outlet, minted against by the franchise PDA
    #[account(
        init,
        payer = owner,
        seeds = [Franchise::TOKEN_SEED, franchise.key().as_ref()],
        bump,
        mint::decimals = 0,
        mint::authority = franchise
    )]
    pub share_mint: Account<'info, Mint>,

    /// Zero-data system account that holds raised capital and dividends
    #[account(
        seeds = [Franchise::VAULT_SEED, franchise.key().as_ref()],
        bump
    )]
    pub franchise_vault: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateFranchise>,
    franchise_slug: String,
    location_address: String,
    building_name: String,
    carpet_area: u64,
    cost_per_area: u64,
    total_shares: u64,
) -> Result<()> {
    require!(
        Business::is_valid_slug(&franchise_slug),
        FranchiseError::InvalidSlug
    );
    require!(
        location_address.len() <= MAX_LOCATION_LEN,
        FranchiseError::LocationTooLong
    );
    require!(
        building_name.len() <= MAX_BUILDING_LEN,
        FranchiseError::BuildingNameTooLong
    );
    require!(carpet_area > 0, FranchiseError::InvalidCarpetArea);
    require!(cost_per_area > 0, FranchiseError::InvalidCostPerArea);
    require!(total_shares > 0, FranchiseError::InvalidShareSupply);

    let total_investment = carpet_area
        .checked_mul(cost_per_area)
        .ok_or(FranchiseError::ArithmeticOverflow)?;

    // A supply larger than the raise target would floor the share price to zero
    require!(
        total_shares <= total_investment,
        FranchiseError::ShareSupplyExceedsInvestment
    );

    let clock = Clock::get()?;
    let franchise = &mut ctx.accounts.franchise;

    franchise.business = ctx.accounts.business.key();
    franchise.owner = ctx.accounts.owner.key();
    franchise.slug = franchise_slug;
    franchise.location_address = location_address;
    franchise.building_name = building_name;
    franchise.carpet_area = carpet_area;
    franchise.cost_per_area = cost_per_area;
    franchise.total_investment = total_investment;
    franchise.total_shares = total_shares;
    franchise.sold_shares = 0;
    franchise.total_raised = 0;
    franchise.capital_recovered = 0;
    franchise.total_revenue = 0;
    franchise.pending_dividends = 0;
    franchise.status = FranchiseStatus::Funding;
    franchise.token_mint = ctx.accounts.share_mint.key();
    franchise.created_at = clock.unix_timestamp;
    franchise.last_payout = 0;
    franchise.bump = ctx.bumps.franchise;
    franchise.vault_bump = ctx.bumps.franchise_vault;

    let business = &mut ctx.accounts.business;
    business.total_franchises = business.total_franchises.saturating_add(1);

    let platform = &mut ctx.accounts.platform;
    platform.total_franchises = platform.total_franchises.saturating_add(1);

    msg!(
        "Franchise created: {}/{} ({} shares at {} lamports, target {})",
        business.slug,
        franchise.slug,
        franchise.total_shares,
        franchise.share_price(),
        franchise.total_investment
    );

    Ok(())
}
