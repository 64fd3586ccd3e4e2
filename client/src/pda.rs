//! Deterministic account address derivation
//!
//! Pure functions from namespace seeds to program-derived addresses. Same
//! inputs always yield the same address; malformed inputs (an empty slug)
//! still derive and are rejected by the program itself.

use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_spl::associated_token::get_associated_token_address;
use franchise_program::state::{Business, Franchise, InvestorPosition, Platform};

pub fn platform(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Platform::SEED], program_id)
}

pub fn platform_vault(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Platform::VAULT_SEED], program_id)
}

pub fn business(program_id: &Pubkey, slug: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Business::SEED, slug.as_bytes()], program_id)
}

pub fn franchise(program_id: &Pubkey, business: &Pubkey, slug: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[Franchise::SEED, business.as_ref(), slug.as_bytes()],
        program_id,
    )
}

pub fn franchise_token(program_id: &Pubkey, franchise: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Franchise::TOKEN_SEED, franchise.as_ref()], program_id)
}

pub fn franchise_vault(program_id: &Pubkey, franchise: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[Franchise::VAULT_SEED, franchise.as_ref()], program_id)
}

pub fn investor_position(program_id: &Pubkey, franchise: &Pubkey, investor: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[InvestorPosition::SEED, franchise.as_ref(), investor.as_ref()],
        program_id,
    )
}

/// Associated token account holding an investor's outlet shares
pub fn investor_share_account(investor: &Pubkey, share_mint: &Pubkey) -> Pubkey {
    get_associated_token_address(investor, share_mint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_id() -> Pubkey {
        franchise_program::ID
    }

    #[test]
    fn derivation_is_deterministic() {
        let id = program_id();
        assert_eq!(platform(&id), platform(&id));
        assert_eq!(business(&id, "blue-bottle"), business(&id, "blue-bottle"));

        let (biz, _) = business(&id, "blue-bottle");
        assert_eq!(
            franchise(&id, &biz, "outlet-1"),
            franchise(&id, &biz, "outlet-1")
        );
    }

    #[test]
    fn namespaces_do_not_collide() {
        let id = program_id();
        assert_ne!(platform(&id).0, platform_vault(&id).0);

        let (biz, _) = business(&id, "blue-bottle");
        let (outlet, _) = franchise(&id, &biz, "outlet-1");
        assert_ne!(franchise_token(&id, &outlet).0, franchise_vault(&id, &outlet).0);
    }

    #[test]
    fn distinct_parents_yield_distinct_addresses() {
        let id = program_id();
        assert_ne!(business(&id, "blue-bottle").0, business(&id, "blue-kettle").0);

        let (a, _) = business(&id, "blue-bottle");
        let (b, _) = business(&id, "blue-kettle");
        assert_ne!(franchise(&id, &a, "outlet-1").0, franchise(&id, &b, "outlet-1").0);
        assert_ne!(franchise(&id, &a, "outlet-1").0, franchise(&id, &a, "outlet-2").0);
    }

    #[test]
    fn empty_slug_still_derives() {
        let id = program_id();
        assert_eq!(business(&id, "").0, business(&id, "").0);
    }
}
