//! Pay out an investor's claimable share of the dividend pool

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::TokenAccount;

use crate::errors::FranchiseError;
use crate::state::{Business, Franchise, InvestorPosition};

#[derive(Accounts)]
pub struct ClaimDividends<'info> {
    #[account(
        seeds = [Business::SEED, business.slug.as_bytes()],
        bump = business.bump
    )]
    pub business: Account<'info, Business>,

    #[account(
        mut,
        seeds = [Franchise::SEED, business.key().as_ref(), franchise.slug.as_bytes()],
        bump = franchise.bump
    )]
    pub franchise: Account<'info, Franchise>,

    /// Share balance held at claim time determines the entitlement
    #[account(
        token::mint = franchise.token_mint,
        token::authority = investor
    )]
    pub investor_token: Account<'info, TokenAccount>,

    /// Claim checkpoint, created on the investor's first claim
    #[account(
        init_if_needed,
        payer = investor,
        space = 8 + InvestorPosition::INIT_SPACE,
        seeds = [InvestorPosition::SEED, franchise.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub position: Account<'info, InvestorPosition>,

    #[account(
        mut,
        seeds = [Franchise::VAULT_SEED, franchise.key().as_ref()],
        bump = franchise.vault_bump
    )]
    pub franchise_vault: SystemAccount<'info>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimDividends>) -> Result<()> {
    let clock = Clock::get()?;

    let position = &mut ctx.accounts.position;
    if position.investor == Pubkey::default() {
        position.franchise = ctx.accounts.franchise.key();
        position.investor = ctx.accounts.investor.key();
        position.dividends_claimed = 0;
        position.created_at = clock.unix_timestamp;
        position.bump = ctx.bumps.position;
    }

    let balance = ctx.accounts.investor_token.amount;
    let payout = ctx
        .accounts
        .franchise
        .record_claim(balance, position.dividends_claimed)?;

    position.dividends_claimed = position
        .dividends_claimed
        .checked_add(payout)
        .ok_or(FranchiseError::ArithmeticOverflow)?;

    // Vault PDA signs the payout
    let franchise_key = ctx.accounts.franchise.key();
    let bump = [ctx.accounts.franchise.vault_bump];
    let seeds: [&[u8]; 3] = [Franchise::VAULT_SEED, franchise_key.as_ref(), &bump];
    let signer_seeds = &[&seeds[..]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.franchise_vault.to_account_info(),
                to: ctx.accounts.investor.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;

    let franchise = &mut ctx.accounts.franchise;
    franchise.last_payout = clock.unix_timestamp;

    msg!(
        "Dividends claimed: {} lamports by {} ({} shares of {})",
        payout,
        ctx.accounts.investor.key(),
        balance,
        franchise.total_shares
    );

    Ok(())
}
