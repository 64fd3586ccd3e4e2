//! Buy fractional shares of a franchise during its funding window

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

use crate::errors::FranchiseError;
use crate::state::{Business, Franchise, Platform};

#[derive(Accounts)]
pub struct InvestInFranchise<'info> {
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
        mut,
        seeds = [Franchise::SEED, business.key().as_ref(), franchise.slug.as_bytes()],
        bump = franchise.bump
    )]
    pub franchise: Account<'info, Franchise>,

    #[account(
        mut,
        address = franchise.token_mint @ FranchiseError::InvalidMint
    )]
    pub share_mint: Account<'info, Mint>,

    /// Investor share account, created on first purchase
    #[account(
        init_if_needed,
        payer = investor,
        associated_token::mint = share_mint,
        associated_token::authority = investor
    )]
    pub investor_token: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [Franchise::VAULT_SEED, franchise.key().as_ref()],
        bump = franchise.vault_bump
    )]
    pub franchise_vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [Platform::VAULT_SEED],
        bump = platform.vault_bump
    )]
    pub platform_vault: SystemAccount<'info>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InvestInFranchise>, shares_to_buy: u64) -> Result<()> {
    let fee_bps = ctx.accounts.platform.fee_bps;
    let receipt = ctx
        .accounts
        .franchise
        .record_investment(shares_to_buy, fee_bps)?;

    // Payment split: net to the franchise vault, fee to the platform vault
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.investor.to_account_info(),
                to: ctx.accounts.franchise_vault.to_account_info(),
            },
        ),
        receipt.net,
    )?;

    if receipt.platform_fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.investor.to_account_info(),
                    to: ctx.accounts.platform_vault.to_account_info(),
                },
            ),
            receipt.platform_fee,
        )?;
    }

    // Mint the purchased shares, the franchise PDA signs as mint authority
    let business_key = ctx.accounts.business.key();
    let bump = [ctx.accounts.franchise.bump];
    let seeds: [&[u8]; 4] = [
        Franchise::SEED,
        business_key.as_ref(),
        ctx.accounts.franchise.slug.as_bytes(),
        &bump,
    ];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.share_mint.to_account_info(),
                to: ctx.accounts.investor_token.to_account_info(),
                authority: ctx.accounts.franchise.to_account_info(),
            },
            signer_seeds,
        ),
        shares_to_buy,
    )?;

    let business = &mut ctx.accounts.business;
    business.total_investment = business.total_investment.saturating_add(receipt.gross);

    let platform = &mut ctx.accounts.platform;
    platform.total_volume = platform.total_volume.saturating_add(receipt.gross);

    let franchise = &ctx.accounts.franchise;
    msg!(
        "Investment: {} shares of {}/{} for {} lamports (fee {}), {}/{} sold",
        shares_to_buy,
        business.slug,
        franchise.slug,
        receipt.gross,
        receipt.platform_fee,
        franchise.sold_shares,
        franchise.total_shares
    );

    Ok(())
}
