//! Repositories over businesses, franchises, and the activity feed
//!
//! The same trait serves UI code against an in-memory fixture store in tests
//! and against the chain in production.

use std::collections::HashMap;
use std::sync::Mutex;

use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::Signature;
use franchise_program::state::{Business, Franchise};

use crate::client::FranchiseClient;
use crate::error::ClientError;

pub trait FranchiseRepository {
    fn business(&self, slug: &str) -> Result<Option<Business>, ClientError>;

    fn franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
    ) -> Result<Option<Franchise>, ClientError>;

    fn franchises_of(&self, business_slug: &str) -> Result<Vec<Franchise>, ClientError>;
}

// ============================================================================
// In-memory double
// ============================================================================

#[derive(Default)]
pub struct MemoryFranchiseRepository {
    businesses: Mutex<HashMap<String, Business>>,
    franchises: Mutex<HashMap<String, Vec<Franchise>>>,
}

impl MemoryFranchiseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_business(&self, business: Business) {
        self.businesses
            .lock()
            .unwrap()
            .insert(business.slug.clone(), business);
    }

    pub fn insert_franchise(&self, business_slug: &str, franchise: Franchise) {
        self.franchises
            .lock()
            .unwrap()
            .entry(business_slug.to_string())
            .or_default()
            .push(franchise);
    }
}

impl FranchiseRepository for MemoryFranchiseRepository {
    fn business(&self, slug: &str) -> Result<Option<Business>, ClientError> {
        Ok(self.businesses.lock().unwrap().get(slug).cloned())
    }

    fn franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
    ) -> Result<Option<Franchise>, ClientError> {
        Ok(self
            .franchises
            .lock()
            .unwrap()
            .get(business_slug)
            .and_then(|outlets| outlets.iter().find(|f| f.slug == franchise_slug))
            .cloned())
    }

    fn franchises_of(&self, business_slug: &str) -> Result<Vec<Franchise>, ClientError> {
        Ok(self
            .franchises
            .lock()
            .unwrap()
            .get(business_slug)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Chain-backed implementation
// ============================================================================

pub struct ChainFranchiseRepository<'a> {
    client: &'a FranchiseClient,
}

impl<'a> ChainFranchiseRepository<'a> {
    pub fn new(client: &'a FranchiseClient) -> Self {
        Self { client }
    }
}

impl FranchiseRepository for ChainFranchiseRepository<'_> {
    fn business(&self, slug: &str) -> Result<Option<Business>, ClientError> {
        self.client.get_business(slug)
    }

    fn franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
    ) -> Result<Option<Franchise>, ClientError> {
        self.client.get_franchise(business_slug, franchise_slug)
    }

    fn franchises_of(&self, business_slug: &str) -> Result<Vec<Franchise>, ClientError> {
        self.client.get_franchises_of(business_slug)
    }
}

// ============================================================================
// Activity feed
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    PlatformInitialized,
    ConfigUpdated,
    BusinessCreated,
    TierAdvanced,
    FranchiseCreated,
    SharesPurchased,
    RevenueDistributed,
    DividendsClaimed,
    CapitalWithdrawn,
    StatusChanged,
}

#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub signature: Signature,
    pub actor: Pubkey,
    pub business_slug: Option<String>,
    pub franchise_slug: Option<String>,
    pub amount: Option<u64>,
}

pub trait TransactionRepository: Send + Sync {
    fn record(&self, record: TransactionRecord);

    /// Most recent records first
    fn recent(&self, limit: usize) -> Vec<TransactionRecord>;
}

#[derive(Default)]
pub struct MemoryTransactionRepository {
    records: Mutex<Vec<TransactionRecord>>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepository for MemoryTransactionRepository {
    fn record(&self, record: TransactionRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn recent(&self, limit: usize) -> Vec<TransactionRecord> {
        let records = self.records.lock().unwrap();
        records.iter().rev().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use franchise_program::state::{FranchiseStatus, VerificationTier};

    fn fixture_business(slug: &str) -> Business {
        Business {
            owner: Pubkey::new_unique(),
            name: "Blue Bottle".to_string(),
            slug: slug.to_string(),
            industry: "food".to_string(),
            category: "cafe".to_string(),
            verification_tier: VerificationTier::Basic,
            total_franchises: 0,
            total_investment: 0,
            created_at: 0,
            bump: 255,
        }
    }

    fn fixture_franchise(slug: &str) -> Franchise {
        Franchise {
            business: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            slug: slug.to_string(),
            location_address: "12 Hill Road".to_string(),
            building_name: "Crystal Plaza".to_string(),
            carpet_area: 500,
            cost_per_area: 2_000,
            total_investment: 1_000_000,
            total_shares: 1_000,
            sold_shares: 400,
            total_raised: 400_000,
            capital_recovered: 0,
            total_revenue: 0,
            pending_dividends: 0,
            status: FranchiseStatus::Funding,
            token_mint: Pubkey::new_unique(),
            created_at: 0,
            last_payout: 0,
            bump: 255,
            vault_bump: 254,
        }
    }

    #[test]
    fn memory_repository_round_trips() {
        let repo = MemoryFranchiseRepository::new();
        repo.insert_business(fixture_business("blue-bottle"));
        repo.insert_franchise("blue-bottle", fixture_franchise("outlet-1"));
        repo.insert_franchise("blue-bottle", fixture_franchise("outlet-2"));

        let business = repo.business("blue-bottle").unwrap().unwrap();
        assert_eq!(business.slug, "blue-bottle");
        assert!(repo.business("unknown").unwrap().is_none());

        let outlet = repo.franchise("blue-bottle", "outlet-2").unwrap().unwrap();
        assert_eq!(outlet.slug, "outlet-2");
        assert!(repo.franchise("blue-bottle", "outlet-9").unwrap().is_none());

        assert_eq!(repo.franchises_of("blue-bottle").unwrap().len(), 2);
        assert!(repo.franchises_of("unknown").unwrap().is_empty());
    }

    #[test]
    fn transaction_feed_returns_newest_first() {
        let feed = MemoryTransactionRepository::new();
        for kind in [
            TransactionKind::BusinessCreated,
            TransactionKind::FranchiseCreated,
            TransactionKind::SharesPurchased,
        ] {
            feed.record(TransactionRecord {
                kind,
                signature: Signature::default(),
                actor: Pubkey::default(),
                business_slug: Some("blue-bottle".to_string()),
                franchise_slug: None,
                amount: None,
            });
        }

        let recent = feed.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].kind, TransactionKind::SharesPurchased);
        assert_eq!(recent[1].kind, TransactionKind::FranchiseCreated);
    }
}
