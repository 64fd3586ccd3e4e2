//! Move a franchise along its lifecycle

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;
use crate::state::{Business, Franchise, FranchiseStatus, Platform};

#[derive(Accounts)]
pub struct UpdateFranchiseStatus<'info> {
    #[account(
        seeds = [Platform::SEED],
        bump = platform.bump
    )]
    pub platform: Account<'info, Platform>,

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

    /// Outlet owner, or the platform authority stepping in
    pub actor: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateFranchiseStatus>, new_status: FranchiseStatus) -> Result<()> {
    let actor = ctx.accounts.actor.key();
    require!(
        actor == ctx.accounts.franchise.owner || actor == ctx.accounts.platform.authority,
        FranchiseError::Unauthorized
    );

    let franchise = &mut ctx.accounts.franchise;
    let previous = franchise.status;
    franchise.transition_to(new_status)?;

    msg!(
        "Franchise {}/{} status: {:?} -> {:?}",
        ctx.accounts.business.slug,
        franchise.slug,
        previous,
        new_status
    );

    Ok(())
}
