//! Advance a business verification tier (platform admin only)

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;
use crate::state::{Business, Platform, VerificationTier};

#[derive(Accounts)]
pub struct SetVerificationTier<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump,
        constraint = platform.authority == authority.key() @ FranchiseError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [Business::SEED, business.slug.as_bytes()],
        bump = business.bump
    )]
    pub business: Account<'info, Business>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetVerificationTier>, tier: VerificationTier) -> Result<()> {
    let business = &mut ctx.accounts.business;

    // Tiers only move forward
    require!(
        tier > business.verification_tier,
        FranchiseError::TierChangeNotAllowed
    );

    msg!(
        "Verification tier for {}: {:?} -> {:?}",
        business.slug,
        business.verification_tier,
        tier
    );

    business.verification_tier = tier;

    Ok(())
}
