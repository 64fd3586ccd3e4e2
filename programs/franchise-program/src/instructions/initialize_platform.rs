//! Initialize the platform configuration and fee vault

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;
use crate::state::{Platform, BPS_DENOMINATOR};

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [Platform::SEED],
        bump
    )]
    pub platform: Account<'info, Platform>,

    /// Zero-data system account that accumulates platform fees
    #[account(
        seeds = [Platform::VAULT_SEED],
        bump
    )]
    pub platform_vault: SystemAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializePlatform>, fee_bps: u16) -> Result<()> {
    require!(
        fee_bps as u64 <= BPS_DENOMINATOR,
        FranchiseError::InvalidFeeBps
    );

    let platform = &mut ctx.accounts.platform;

    platform.authority = ctx.accounts.authority.key();
    platform.fee_bps = fee_bps;
    platform.total_franchises = 0;
    platform.total_volume = 0;
    platform.created_at = Clock::get()?.unix_timestamp;
    platform.bump = ctx.bumps.platform;
    platform.vault_bump = ctx.bumps.platform_vault;

    msg!(
        "Platform initialized: authority {} fee {} bps",
        platform.authority,
        platform.fee_bps
    );

    Ok(())
}
