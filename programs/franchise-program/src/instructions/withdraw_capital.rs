//! Owner withdrawal of raised capital from the franchise vault

use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::FranchiseError;
use crate::state::{Business, Franchise};

#[derive(Accounts)]
pub struct WithdrawCapital<'info> {
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

pub fn handler(ctx: Context<WithdrawCapital>, amount: u64) -> Result<()> {
    ctx.accounts.franchise.record_capital_withdrawal(amount)?;

    let franchise_key = ctx.accounts.franchise.key();
    let bump = [ctx.accounts.franchise.vault_bump];
    let seeds: [&[u8]; 3] = [Franchise::VAULT_SEED, franchise_key.as_ref(), &bump];
    let signer_seeds = &[&seeds[..]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.franchise_vault.to_account_info(),
                to: ctx.accounts.owner.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    let franchise = &ctx.accounts.franchise;
    msg!(
        "Capital withdrawn: {} lamports from {}/{}, {} of {} recovered",
        amount,
        ctx.accounts.business.slug,
        franchise.slug,
        franchise.capital_recovered,
        franchise.total_raised
    );

    Ok(())
}
