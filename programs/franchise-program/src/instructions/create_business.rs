//! Register a new franchise brand

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;
use crate::state::{Business, VerificationTier, MAX_LABEL_LEN, MAX_NAME_LEN};

#[derive(Accounts)]
#[instruction(name: String, slug: String)]
pub struct CreateBusiness<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + Business::INIT_SPACE,
        seeds = [Business::SEED, slug.as_bytes()],
        bump
    )]
    pub business: Account<'info, Business>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<CreateBusiness>,
    name: String,
    slug: String,
    industry: String,
    category: String,
) -> Result<()> {
    require!(name.len() <= MAX_NAME_LEN, FranchiseError::NameTooLong);
    require!(Business::is_valid_slug(&slug), FranchiseError::InvalidSlug);
    require!(
        industry.len() <= MAX_LABEL_LEN,
        FranchiseError::IndustryTooLong
    );
    require!(
        category.len() <= MAX_LABEL_LEN,
        FranchiseError::CategoryTooLong
    );

    let business = &mut ctx.accounts.business;

    business.owner = ctx.accounts.owner.key();
    business.name = name;
    business.slug = slug;
    business.industry = industry;
    business.category = category;
    business.verification_tier = VerificationTier::Unverified;
    business.total_franchises = 0;
    business.total_investment = 0;
    business.created_at = Clock::get()?.unix_timestamp;
    business.bump = ctx.bumps.business;

    msg!(
        "Business created: {} ({}) by {}",
        business.name,
        business.slug,
        business.owner
    );

    Ok(())
}
