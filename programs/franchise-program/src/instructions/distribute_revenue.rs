//! Deposit outlet revenue into the dividend pool

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::FranchiseError;
use crate::state::{Business, Franchise};

#[derive(Accounts)]
pub struct DistributeRevenue<'info> {
    #[account(
        seeds = [Business::SEED, business.slug.as_bytes()],
        bump = business.bump
    )]
    pub business: Account<'info, Business>,

    #[account(
        mut,
        seeds = [Franchise::SEED, business.key().as_ref(), franchise.slug.as_bytes()],
        bump = franchise.bump,
        has_one = owner @ FranchiseError::Unauthorized
    )]
    pub franchise: Account<'info, Franchise>,

    #[account(
        mut,
        seeds = [Franchise::VAULT_SEED, franchise.key().as_ref()],
        bump = franchise.vault_bump
    )]
    pub franchise_vault: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<DistributeRevenue>, total_revenue: u64) -> Result<()> {
    ctx.accounts.franchise.record_revenue(total_revenue)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.owner.to_account_info(),
                to: ctx.accounts.franchise_vault.to_account_info(),
            },
        ),
        total_revenue,
    )?;

    let franchise = &ctx.accounts.franchise;
    msg!(
        "Revenue distributed: {} lamports into {}/{}, pending pool {}",
        total_revenue,
        ctx.accounts.business.slug,
        franchise.slug,
        franchise.pending_dividends
    );

    Ok(())
}
