//! Account structures for the franchise investment ledger

use anchor_lang::prelude::*;

use crate::errors::FranchiseError;

/// Maximum length for a business display name
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length for business and franchise slugs
pub const MAX_SLUG_LEN: usize = 32;

/// Maximum length for industry and category labels
pub const MAX_LABEL_LEN: usize = 32;

/// Maximum length for a franchise location address
pub const MAX_LOCATION_LEN: usize = 128;

/// Maximum length for a building name
pub const MAX_BUILDING_LEN: usize = 64;

/// Basis point denominator for the platform fee
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Floored basis-point fee on a gross amount
pub fn platform_fee(gross: u64, fee_bps: u16) -> u64 {
    ((gross as u128 * fee_bps as u128) / BPS_DENOMINATOR as u128) as u64
}

// ============================================================================
// Platform
// ============================================================================

/// Global platform configuration and aggregate stats
#[account]
#[derive(InitSpace)]
pub struct Platform {
    /// Platform admin authority
    pub authority: Pubkey,

    /// Fee taken on every investment, in basis points
    pub fee_bps: u16,

    /// Total number of franchises created across all businesses
    pub total_franchises: u64,

    /// Gross investment volume routed through the platform
    pub total_volume: u64,

    /// Unix timestamp of initialization
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Bump seed of the platform fee vault PDA
    pub vault_bump: u8,
}

impl Platform {
    pub const SEED: &'static [u8] = b"platform";
    pub const VAULT_SEED: &'static [u8] = b"platform_vault";

    /// Fee owed to the platform on a gross investment amount
    pub fn fee_for(&self, gross: u64) -> u64 {
        platform_fee(gross, self.fee_bps)
    }
}

// ============================================================================
// Business
// ============================================================================

/// Admin-assigned trust level for a business
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default,
)]
pub enum VerificationTier {
    #[default]
    Unverified,
    Basic,
    Full,
}

impl Space for VerificationTier {
    const INIT_SPACE: usize = 1;
}

/// A registered franchise brand
#[account]
#[derive(InitSpace)]
pub struct Business {
    /// Brand owner
    pub owner: Pubkey,

    /// Display name
    #[max_len(MAX_NAME_LEN)]
    pub name: String,

    /// Unique slug, immutable once created (doubles as the PDA seed)
    #[max_len(MAX_SLUG_LEN)]
    pub slug: String,

    /// Industry classification
    #[max_len(MAX_LABEL_LEN)]
    pub industry: String,

    /// Category within the industry
    #[max_len(MAX_LABEL_LEN)]
    pub category: String,

    /// Admin-assigned verification tier
    pub verification_tier: VerificationTier,

    /// Number of outlets opened under this brand
    pub total_franchises: u64,

    /// Gross investment raised across all outlets
    pub total_investment: u64,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Business {
    pub const SEED: &'static [u8] = b"business";

    /// Slugs are non-empty lowercase alphanumeric with hyphens
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug.len() <= MAX_SLUG_LEN
            && slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    }
}

// ============================================================================
// Franchise
// ============================================================================

/// Lifecycle status of a franchise outlet
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FranchiseStatus {
    #[default]
    Funding,
    Launching,
    Active,
    Paused,
    Closed,
}

impl Space for FranchiseStatus {
    const INIT_SPACE: usize = 1;
}

impl FranchiseStatus {
    /// Legal forward edges, plus the reversible Active <-> Paused pair
    pub fn can_transition_to(self, next: FranchiseStatus) -> bool {
        use FranchiseStatus::*;
        matches!(
            (self, next),
            (Funding, Launching)
                | (Launching, Active)
                | (Active, Paused)
                | (Active, Closed)
                | (Paused, Active)
        )
    }

    pub fn accepts_investment(self) -> bool {
        self == FranchiseStatus::Funding
    }

    /// Revenue is only recorded between launch and closure
    pub fn accepts_revenue(self) -> bool {
        use FranchiseStatus::*;
        matches!(self, Launching | Active | Paused)
    }
}

/// Breakdown of a single share purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentReceipt {
    /// Lamports paid by the investor
    pub gross: u64,

    /// Portion routed to the platform fee vault
    pub platform_fee: u64,

    /// Portion routed to the franchise vault
    pub net: u64,
}

/// A single physical outlet under a business, the unit of fractional
/// investment
#[account]
#[derive(InitSpace)]
pub struct Franchise {
    /// Parent business account
    pub business: Pubkey,

    /// Outlet operator
    pub owner: Pubkey,

    /// Slug unique within the business, immutable (PDA seed)
    #[max_len(MAX_SLUG_LEN)]
    pub slug: String,

    /// Street address of the outlet
    #[max_len(MAX_LOCATION_LEN)]
    pub location_address: String,

    /// Building or complex name
    #[max_len(MAX_BUILDING_LEN)]
    pub building_name: String,

    /// Carpet area in square feet
    pub carpet_area: u64,

    /// Cost per unit area in lamports
    pub cost_per_area: u64,

    /// carpet_area * cost_per_area, fixed at creation and never recomputed
    pub total_investment: u64,

    /// Total share supply
    pub total_shares: u64,

    /// Shares sold so far, never exceeds total_shares
    pub sold_shares: u64,

    /// Lamports raised into the franchise vault, net of platform fees
    pub total_raised: u64,

    /// Lamports of raised capital withdrawn by the owner
    pub capital_recovered: u64,

    /// Cumulative revenue recorded for dividend accrual
    pub total_revenue: u64,

    /// Undistributed dividend pool
    pub pending_dividends: u64,

    /// Lifecycle status
    pub status: FranchiseStatus,

    /// SPL mint of the outlet's share tokens
    pub token_mint: Pubkey,

    /// Unix timestamp of creation
    pub created_at: i64,

    /// Unix timestamp of the last dividend payout
    pub last_payout: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Bump seed of the franchise vault PDA
    pub vault_bump: u8,
}

impl Franchise {
    pub const SEED: &'static [u8] = b"franchise";
    pub const TOKEN_SEED: &'static [u8] = b"franchise_token";
    pub const VAULT_SEED: &'static [u8] = b"franchise_vault";

    /// Floored lamport price of a single share
    pub fn share_price(&self) -> u64 {
        self.total_investment / self.total_shares
    }

    pub fn remaining_shares(&self) -> u64 {
        self.total_shares - self.sold_shares
    }

    /// Gross lamport cost of a share purchase
    pub fn investment_cost(&self, shares: u64) -> Result<u64> {
        let cost = shares as u128 * self.share_price() as u128;
        u64::try_from(cost).map_err(|_| error!(FranchiseError::ArithmeticOverflow))
    }

    /// Validate and book a share purchase, returning the payment split
    pub fn record_investment(&mut self, shares: u64, fee_bps: u16) -> Result<InvestmentReceipt> {
        require!(
            self.status.accepts_investment(),
            FranchiseError::NotInFundingStatus
        );
        require!(shares > 0, FranchiseError::InvalidShareAmount);
        require!(
            shares <= self.remaining_shares(),
            FranchiseError::InsufficientSharesAvailable
        );

        let gross = self.investment_cost(shares)?;
        let fee = platform_fee(gross, fee_bps);
        let net = gross - fee;

        self.sold_shares += shares;
        self.total_raised = self
            .total_raised
            .checked_add(net)
            .ok_or(FranchiseError::ArithmeticOverflow)?;

        Ok(InvestmentReceipt {
            gross,
            platform_fee: fee,
            net,
        })
    }

    /// Book deposited revenue into the dividend pool
    pub fn record_revenue(&mut self, amount: u64) -> Result<()> {
        require!(
            self.status.accepts_revenue(),
            FranchiseError::RevenueNotAccepted
        );
        require!(amount > 0, FranchiseError::InvalidRevenueAmount);

        self.total_revenue = self
            .total_revenue
            .checked_add(amount)
            .ok_or(FranchiseError::ArithmeticOverflow)?;
        self.pending_dividends = self
            .pending_dividends
            .checked_add(amount)
            .ok_or(FranchiseError::ArithmeticOverflow)?;

        Ok(())
    }

    /// Lifetime dividend entitlement of a holder with the given share balance
    pub fn lifetime_entitlement(&self, balance: u64) -> Result<u64> {
        let entitlement = balance as u128 * self.total_revenue as u128 / self.total_shares as u128;
        u64::try_from(entitlement).map_err(|_| error!(FranchiseError::ArithmeticOverflow))
    }

    /// Validate and book a dividend claim, returning the payout
    pub fn record_claim(&mut self, balance: u64, already_claimed: u64) -> Result<u64> {
        require!(balance > 0, FranchiseError::ZeroShareBalance);

        let entitlement = self.lifetime_entitlement(balance)?;
        let payout = entitlement.saturating_sub(already_claimed);
        require!(payout > 0, FranchiseError::NothingToClaim);

        self.pending_dividends = self
            .pending_dividends
            .checked_sub(payout)
            .ok_or(FranchiseError::ArithmeticOverflow)?;

        Ok(payout)
    }

    /// Validate and book an owner capital withdrawal
    pub fn record_capital_withdrawal(&mut self, amount: u64) -> Result<()> {
        require!(
            self.status != FranchiseStatus::Funding,
            FranchiseError::FundingStillOpen
        );
        require!(amount > 0, FranchiseError::InvalidWithdrawalAmount);

        let recoverable = self.total_raised.saturating_sub(self.capital_recovered);
        require!(
            amount <= recoverable,
            FranchiseError::WithdrawalExceedsRecoverable
        );

        self.capital_recovered += amount;
        Ok(())
    }

    pub fn transition_to(&mut self, next: FranchiseStatus) -> Result<()> {
        require!(
            self.status.can_transition_to(next),
            FranchiseError::InvalidStatusTransition
        );
        self.status = next;
        Ok(())
    }
}

// ============================================================================
// Investor Position
// ============================================================================

/// Per-investor dividend claim checkpoint for a franchise
#[account]
#[derive(InitSpace)]
pub struct InvestorPosition {
    /// Franchise this position belongs to
    pub franchise: Pubkey,

    /// Investor wallet
    pub investor: Pubkey,

    /// Lifetime dividends already paid to this investor
    pub dividends_claimed: u64,

    /// Unix timestamp of first claim
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl InvestorPosition {
    pub const SEED: &'static [u8] = b"position";
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn funding_franchise(total_shares: u64, total_investment: u64) -> Franchise {
        Franchise {
            business: Pubkey::default(),
            owner: Pubkey::default(),
            slug: "outlet-1".to_string(),
            location_address: "12 Hill Road".to_string(),
            building_name: "Crystal Plaza".to_string(),
            carpet_area: 1,
            cost_per_area: total_investment,
            total_investment,
            total_shares,
            sold_shares: 0,
            total_raised: 0,
            capital_recovered: 0,
            total_revenue: 0,
            pending_dividends: 0,
            status: FranchiseStatus::Funding,
            token_mint: Pubkey::default(),
            created_at: 0,
            last_payout: 0,
            bump: 255,
            vault_bump: 255,
        }
    }

    fn launched_franchise(total_shares: u64, total_investment: u64) -> Franchise {
        let mut f = funding_franchise(total_shares, total_investment);
        f.status = FranchiseStatus::Active;
        f
    }

    #[test]
    fn status_machine_allows_exactly_the_documented_edges() {
        use FranchiseStatus::*;
        let all = [Funding, Launching, Active, Paused, Closed];
        let legal = [
            (Funding, Launching),
            (Launching, Active),
            (Active, Paused),
            (Active, Closed),
            (Paused, Active),
        ];

        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "transition {:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn only_funding_accepts_investment() {
        use FranchiseStatus::*;
        assert!(Funding.accepts_investment());
        for status in [Launching, Active, Paused, Closed] {
            assert!(!status.accepts_investment());
        }
    }

    #[test]
    fn oversubscription_is_rejected_never_partially_filled() {
        let mut f = funding_franchise(1000, 1_000_000);
        f.sold_shares = 400;

        let err = f.record_investment(700, 100).unwrap_err();
        assert_eq!(err, FranchiseError::InsufficientSharesAvailable.into());
        assert_eq!(f.sold_shares, 400);

        f.record_investment(600, 100).unwrap();
        assert_eq!(f.sold_shares, 1000);
        assert_eq!(f.remaining_shares(), 0);
    }

    #[test]
    fn investment_outside_funding_is_rejected() {
        let mut f = funding_franchise(1000, 1_000_000);
        f.status = FranchiseStatus::Active;
        assert_eq!(
            f.record_investment(1, 0),
            Err(FranchiseError::NotInFundingStatus.into())
        );
    }

    #[test]
    fn zero_share_purchase_is_rejected() {
        let mut f = funding_franchise(1000, 1_000_000);
        assert_eq!(
            f.record_investment(0, 0),
            Err(FranchiseError::InvalidShareAmount.into())
        );
    }

    #[test]
    fn fee_split_floors_and_reconciles() {
        let mut f = funding_franchise(1000, 999_999);
        // price floors to 999 lamports per share
        assert_eq!(f.share_price(), 999);

        let receipt = f.record_investment(3, 250).unwrap();
        assert_eq!(receipt.gross, 2997);
        // 2.5% of 2997 floors from 74.925 to 74
        assert_eq!(receipt.platform_fee, 74);
        assert_eq!(receipt.net, 2923);
        assert_eq!(receipt.platform_fee + receipt.net, receipt.gross);
        assert_eq!(f.total_raised, 2923);
    }

    #[test]
    fn revenue_requires_launched_status() {
        let mut f = funding_franchise(1000, 1_000_000);
        assert_eq!(
            f.record_revenue(100),
            Err(FranchiseError::RevenueNotAccepted.into())
        );

        f.status = FranchiseStatus::Closed;
        assert_eq!(
            f.record_revenue(100),
            Err(FranchiseError::RevenueNotAccepted.into())
        );

        f.status = FranchiseStatus::Active;
        f.record_revenue(100).unwrap();
        assert_eq!(f.total_revenue, 100);
        assert_eq!(f.pending_dividends, 100);
    }

    #[test]
    fn claim_with_zero_balance_is_rejected() {
        let mut f = launched_franchise(1000, 1_000_000);
        f.record_revenue(10_000).unwrap();
        assert_eq!(
            f.record_claim(0, 0),
            Err(FranchiseError::ZeroShareBalance.into())
        );
    }

    #[test]
    fn first_claim_is_proportional_to_holdings() {
        let mut f = launched_franchise(1000, 1_000_000);
        f.record_revenue(10_000).unwrap();

        // 250 of 1000 shares -> a quarter of the pool
        let payout = f.record_claim(250, 0).unwrap();
        assert_eq!(payout, 2500);
        assert_eq!(f.pending_dividends, 7500);
    }

    #[test]
    fn repeat_claim_without_new_revenue_pays_nothing() {
        let mut f = launched_franchise(1000, 1_000_000);
        f.record_revenue(10_000).unwrap();

        let first = f.record_claim(250, 0).unwrap();
        assert_eq!(
            f.record_claim(250, first),
            Err(FranchiseError::NothingToClaim.into())
        );

        f.record_revenue(4_000).unwrap();
        let second = f.record_claim(250, first).unwrap();
        assert_eq!(second, 1000);
        assert_eq!(f.pending_dividends, 7500 + 4000 - 1000);
    }

    #[test]
    fn entitlement_floors_fractional_shares_of_the_pool() {
        let mut f = launched_franchise(3, 999);
        f.record_revenue(100).unwrap();
        // 1/3 of 100 floors to 33
        assert_eq!(f.record_claim(1, 0).unwrap(), 33);
    }

    #[test]
    fn capital_withdrawal_is_capped_and_blocked_during_funding() {
        let mut f = funding_franchise(1000, 1_000_000);
        f.record_investment(1000, 0).unwrap();
        assert_eq!(
            f.record_capital_withdrawal(1),
            Err(FranchiseError::FundingStillOpen.into())
        );

        f.status = FranchiseStatus::Active;
        assert_eq!(
            f.record_capital_withdrawal(f.total_raised + 1),
            Err(FranchiseError::WithdrawalExceedsRecoverable.into())
        );

        f.record_capital_withdrawal(400_000).unwrap();
        assert_eq!(f.capital_recovered, 400_000);
        assert_eq!(
            f.record_capital_withdrawal(700_000),
            Err(FranchiseError::WithdrawalExceedsRecoverable.into())
        );
    }

    #[test]
    fn verification_tier_orders_forward() {
        assert!(VerificationTier::Unverified < VerificationTier::Basic);
        assert!(VerificationTier::Basic < VerificationTier::Full);
    }

    #[test]
    fn slug_validation() {
        assert!(Business::is_valid_slug("blue-bottle-2"));
        assert!(!Business::is_valid_slug(""));
        assert!(!Business::is_valid_slug("Blue"));
        assert!(!Business::is_valid_slug("caf\u{e9}"));
        assert!(!Business::is_valid_slug(&"x".repeat(MAX_SLUG_LEN + 1)));
    }

    proptest! {
        #[test]
        fn sold_shares_never_exceed_total(
            total_shares in 1u64..=100_000,
            requests in proptest::collection::vec(1u64..=5_000, 0..20),
            fee_bps in 0u16..=10_000,
        ) {
            let mut f = funding_franchise(total_shares, 10_000_000);
            for shares in requests {
                let _ = f.record_investment(shares, fee_bps);
                prop_assert!(f.sold_shares <= f.total_shares);
            }
        }

        #[test]
        fn fee_never_exceeds_gross(gross_shares in 1u64..=10_000, fee_bps in 0u16..=10_000) {
            let mut f = funding_franchise(10_000, 50_000_000);
            if let Ok(receipt) = f.record_investment(gross_shares, fee_bps) {
                prop_assert!(receipt.platform_fee <= receipt.gross);
                prop_assert_eq!(receipt.platform_fee + receipt.net, receipt.gross);
            }
        }

        #[test]
        fn pending_pool_stays_reconciled(
            revenues in proptest::collection::vec(1u64..=1_000_000, 1..10),
            balance in 1u64..=1_000,
        ) {
            let mut f = launched_franchise(1_000, 1_000_000);
            let mut claimed = 0u64;
            for revenue in revenues {
                f.record_revenue(revenue).unwrap();
                if let Ok(payout) = f.record_claim(balance, claimed) {
                    claimed += payout;
                }
                // pool always covers what remains claimable by everyone
                prop_assert!(claimed <= f.total_revenue);
                prop_assert_eq!(f.pending_dividends, f.total_revenue - claimed);
            }
        }
    }
}
