//! Update the platform fee or hand over the admin authority

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;
use crate::state::{Platform, BPS_DENOMINATOR};

#[derive(Accounts)]
pub struct UpdatePlatformConfig<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
        constraint = platform.authority == authority.key() @ FranchiseError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,

    pub authority: Signer<'info>,
}

pub fn handler(
    ctx: Context<UpdatePlatformConfig>,
    new_fee_bps: Option<u16>,
    new_authority: Option<Pubkey>,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;

    if let Some(fee_bps) = new_fee_bps {
        require!(
            fee_bps as u64 <= BPS_DENOMINATOR,
            FranchiseError::InvalidFeeBps
        );
        msg!("Platform fee updated: {} -> {} bps", platform.fee_bps, fee_bps);
        platform.fee_bps = fee_bps;
    }

    if let Some(authority) = new_authority {
        msg!(
            "Platform authority transferred: {} -> {}",
            platform.authority,
            authority
        );
        platform.authority = authority;
    }

    Ok(())
}
