//! Blocking RPC client for the franchise investment ledger
//!
//! A thin typed caller: derives the account addresses an instruction needs,
//! submits exactly once, and surfaces ledger rejections verbatim. The only
//! state it holds is the signing identity and the injected capabilities.

use std::rc::Rc;

use anchor_client::anchor_lang::AccountDeserialize;
use anchor_client::solana_client::rpc_filter::{Memcmp, RpcFilterType};
use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::{read_keypair_file, Keypair, Signature};
use anchor_client::solana_sdk::system_program;
use anchor_client::{Client, Program};
use anchor_spl::token::TokenAccount;
use tracing::{debug, info};

use franchise_program::state::{Business, Franchise, FranchiseStatus, Platform, VerificationTier};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::math::{IntegerMath, WideMath};
use crate::pda;
use crate::repository::{
    MemoryTransactionRepository, TransactionKind, TransactionRecord, TransactionRepository,
};

pub struct FranchiseClient {
    program: Program<Rc<Keypair>>,
    program_id: Pubkey,
    commitment: CommitmentConfig,
    math: Box<dyn IntegerMath>,
    transactions: Box<dyn TransactionRepository>,
}

impl FranchiseClient {
    /// Connect with full-width math and an in-memory activity feed
    pub fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        Self::connect_with(
            config,
            Box::new(WideMath),
            Box::new(MemoryTransactionRepository::new()),
        )
    }

    /// Connect with injected arithmetic and activity-feed capabilities.
    ///
    /// Setup problems surface here, not from inside later calls: a client
    /// value only exists once the keypair, cluster, and program handle all
    /// resolved.
    pub fn connect_with(
        config: ClientConfig,
        math: Box<dyn IntegerMath>,
        transactions: Box<dyn TransactionRepository>,
    ) -> Result<Self, ClientError> {
        let keypair = read_keypair_file(&config.keypair_path).map_err(|err| {
            ClientError::Unavailable(format!(
                "cannot read keypair {}: {err}",
                config.keypair_path.display()
            ))
        })?;

        let client = Client::new_with_options(
            config.cluster.clone(),
            Rc::new(keypair),
            config.commitment,
        );
        let program = client.program(config.program_id).map_err(|err| {
            ClientError::Unavailable(format!("cannot open program {}: {err}", config.program_id))
        })?;

        info!(program = %config.program_id, cluster = %config.cluster, "franchise client connected");

        Ok(Self {
            program,
            program_id: config.program_id,
            commitment: config.commitment,
            math,
            transactions,
        })
    }

    pub fn payer(&self) -> Pubkey {
        self.program.payer()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn transactions(&self) -> &dyn TransactionRepository {
        self.transactions.as_ref()
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    pub fn initialize_platform(&self, fee_bps: u16) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);
        let (platform_vault, _) = pda::platform_vault(&self.program_id);

        debug!(fee_bps, "initializing platform");
        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::InitializePlatform {
                platform,
                platform_vault,
                authority: self.payer(),
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::InitializePlatform { fee_bps })
            .send()?;

        self.record(TransactionKind::PlatformInitialized, signature, None, None, None);
        Ok(signature)
    }

    pub fn update_platform_config(
        &self,
        new_fee_bps: Option<u16>,
        new_authority: Option<Pubkey>,
    ) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::UpdatePlatformConfig {
                platform,
                authority: self.payer(),
            })
            .args(franchise_program::instruction::UpdatePlatformConfig {
                new_fee_bps,
                new_authority,
            })
            .send()?;

        self.record(TransactionKind::ConfigUpdated, signature, None, None, None);
        Ok(signature)
    }

    pub fn create_business(
        &self,
        name: &str,
        slug: &str,
        industry: &str,
        category: &str,
    ) -> Result<Signature, ClientError> {
        let (business, _) = pda::business(&self.program_id, slug);

        debug!(slug, "creating business");
        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::CreateBusiness {
                business,
                owner: self.payer(),
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::CreateBusiness {
                name: name.to_string(),
                slug: slug.to_string(),
                industry: industry.to_string(),
                category: category.to_string(),
            })
            .send()?;

        self.record(
            TransactionKind::BusinessCreated,
            signature,
            Some(slug),
            None,
            None,
        );
        Ok(signature)
    }

    pub fn set_verification_tier(
        &self,
        business_slug: &str,
        tier: VerificationTier,
    ) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);
        let (business, _) = pda::business(&self.program_id, business_slug);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::SetVerificationTier {
                platform,
                business,
                authority: self.payer(),
            })
            .args(franchise_program::instruction::SetVerificationTier { tier })
            .send()?;

        self.record(
            TransactionKind::TierAdvanced,
            signature,
            Some(business_slug),
            None,
            None,
        );
        Ok(signature)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        location_address: &str,
        building_name: &str,
        carpet_area: u64,
        cost_per_area: u64,
        total_shares: u64,
    ) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (share_mint, _) = pda::franchise_token(&self.program_id, &franchise);
        let (franchise_vault, _) = pda::franchise_vault(&self.program_id, &franchise);

        debug!(business_slug, franchise_slug, carpet_area, cost_per_area, total_shares,
            "creating franchise");
        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::CreateFranchise {
                platform,
                business,
                franchise,
                share_mint,
                franchise_vault,
                owner: self.payer(),
                token_program: anchor_spl::token::ID,
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::CreateFranchise {
                franchise_slug: franchise_slug.to_string(),
                location_address: location_address.to_string(),
                building_name: building_name.to_string(),
                carpet_area,
                cost_per_area,
                total_shares,
            })
            .send()?;

        self.record(
            TransactionKind::FranchiseCreated,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            None,
        );
        Ok(signature)
    }

    /// Buy shares during the funding window. The investor's share account is
    /// created implicitly on first purchase.
    pub fn invest_in_franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        shares_to_buy: u64,
    ) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (share_mint, _) = pda::franchise_token(&self.program_id, &franchise);
        let (franchise_vault, _) = pda::franchise_vault(&self.program_id, &franchise);
        let (platform_vault, _) = pda::platform_vault(&self.program_id);
        let investor = self.payer();
        let investor_token = pda::investor_share_account(&investor, &share_mint);

        // Estimate for the activity feed; the binding amount is computed on
        // the ledger.
        let estimated_cost = self
            .get_franchise(business_slug, franchise_slug)?
            .map(|f| self.estimate_investment_cost(&f, shares_to_buy))
            .transpose()?;

        debug!(business_slug, franchise_slug, shares_to_buy, ?estimated_cost,
            "submitting investment");
        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::InvestInFranchise {
                platform,
                business,
                franchise,
                share_mint,
                investor_token,
                franchise_vault,
                platform_vault,
                investor,
                token_program: anchor_spl::token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::InvestInFranchise { shares_to_buy })
            .send()?;

        self.record(
            TransactionKind::SharesPurchased,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            estimated_cost,
        );
        Ok(signature)
    }

    pub fn distribute_revenue(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        total_revenue: u64,
    ) -> Result<Signature, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (franchise_vault, _) = pda::franchise_vault(&self.program_id, &franchise);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::DistributeRevenue {
                business,
                franchise,
                franchise_vault,
                owner: self.payer(),
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::DistributeRevenue { total_revenue })
            .send()?;

        self.record(
            TransactionKind::RevenueDistributed,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            Some(total_revenue),
        );
        Ok(signature)
    }

    pub fn claim_dividends(
        &self,
        business_slug: &str,
        franchise_slug: &str,
    ) -> Result<Signature, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (share_mint, _) = pda::franchise_token(&self.program_id, &franchise);
        let (franchise_vault, _) = pda::franchise_vault(&self.program_id, &franchise);
        let investor = self.payer();
        let investor_token = pda::investor_share_account(&investor, &share_mint);
        let (position, _) = pda::investor_position(&self.program_id, &franchise, &investor);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::ClaimDividends {
                business,
                franchise,
                investor_token,
                position,
                franchise_vault,
                investor,
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::ClaimDividends {})
            .send()?;

        self.record(
            TransactionKind::DividendsClaimed,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            None,
        );
        Ok(signature)
    }

    pub fn withdraw_capital(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        amount: u64,
    ) -> Result<Signature, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (franchise_vault, _) = pda::franchise_vault(&self.program_id, &franchise);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::WithdrawCapital {
                business,
                franchise,
                franchise_vault,
                owner: self.payer(),
                system_program: system_program::ID,
            })
            .args(franchise_program::instruction::WithdrawCapital { amount })
            .send()?;

        self.record(
            TransactionKind::CapitalWithdrawn,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            Some(amount),
        );
        Ok(signature)
    }

    pub fn update_franchise_status(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        new_status: FranchiseStatus,
    ) -> Result<Signature, ClientError> {
        let (platform, _) = pda::platform(&self.program_id);
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);

        let signature = self
            .program
            .request()
            .accounts(franchise_program::accounts::UpdateFranchiseStatus {
                platform,
                business,
                franchise,
                actor: self.payer(),
            })
            .args(franchise_program::instruction::UpdateFranchiseStatus { new_status })
            .send()?;

        self.record(
            TransactionKind::StatusChanged,
            signature,
            Some(business_slug),
            Some(franchise_slug),
            None,
        );
        Ok(signature)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn get_platform(&self) -> Result<Option<Platform>, ClientError> {
        self.fetch_account(pda::platform(&self.program_id).0)
    }

    pub fn get_business(&self, slug: &str) -> Result<Option<Business>, ClientError> {
        self.fetch_account(pda::business(&self.program_id, slug).0)
    }

    pub fn get_franchise(
        &self,
        business_slug: &str,
        franchise_slug: &str,
    ) -> Result<Option<Franchise>, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        self.fetch_account(pda::franchise(&self.program_id, &business, franchise_slug).0)
    }

    pub fn get_franchises_of(&self, business_slug: &str) -> Result<Vec<Franchise>, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        let filters = vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            8,
            business.as_ref(),
        ))];
        let accounts = self.program.accounts::<Franchise>(filters)?;
        Ok(accounts.into_iter().map(|(_, franchise)| franchise).collect())
    }

    /// Share balance of an investor. An address that never invested reads as
    /// zero, it is not an error.
    pub fn get_investor_token_balance(
        &self,
        business_slug: &str,
        franchise_slug: &str,
        investor: &Pubkey,
    ) -> Result<u64, ClientError> {
        let (business, _) = pda::business(&self.program_id, business_slug);
        let (franchise, _) = pda::franchise(&self.program_id, &business, franchise_slug);
        let (share_mint, _) = pda::franchise_token(&self.program_id, &franchise);
        let ata = pda::investor_share_account(investor, &share_mint);

        let response = self
            .program
            .rpc()
            .get_account_with_commitment(&ata, self.commitment)?;

        match response.value {
            None => Ok(0),
            Some(account) => {
                let token = TokenAccount::try_deserialize(&mut account.data.as_slice())
                    .map_err(|err| ClientError::Decode("token account", err))?;
                Ok(token.amount)
            }
        }
    }

    // ========================================================================
    // Estimates
    // ========================================================================

    /// Floored gross cost of a share purchase, using the injected arithmetic
    pub fn estimate_investment_cost(
        &self,
        franchise: &Franchise,
        shares: u64,
    ) -> Result<u64, ClientError> {
        estimate_investment_cost(self.math.as_ref(), franchise, shares)
    }

    /// Claimable dividends for a holder, mirroring the ledger's checkpoint
    /// accounting
    pub fn estimate_claimable(
        &self,
        franchise: &Franchise,
        balance: u64,
        already_claimed: u64,
    ) -> Result<u64, ClientError> {
        estimate_claimable(self.math.as_ref(), franchise, balance, already_claimed)
    }

    fn fetch_account<T: AccountDeserialize>(
        &self,
        address: Pubkey,
    ) -> Result<Option<T>, ClientError> {
        match self.program.account::<T>(address) {
            Ok(value) => Ok(Some(value)),
            Err(anchor_client::ClientError::AccountNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn record(
        &self,
        kind: TransactionKind,
        signature: Signature,
        business_slug: Option<&str>,
        franchise_slug: Option<&str>,
        amount: Option<u64>,
    ) {
        self.transactions.record(TransactionRecord {
            kind,
            signature,
            actor: self.payer(),
            business_slug: business_slug.map(str::to_string),
            franchise_slug: franchise_slug.map(str::to_string),
            amount,
        });
    }
}

/// Floored gross cost of buying `shares` at the outlet's fixed per-share price
pub fn estimate_investment_cost(
    math: &dyn IntegerMath,
    franchise: &Franchise,
    shares: u64,
) -> Result<u64, ClientError> {
    if franchise.total_shares == 0 {
        return Err(ClientError::Math("share price"));
    }
    let price = franchise.total_investment / franchise.total_shares;
    math.checked_mul(shares, price)
        .ok_or(ClientError::Math("investment cost"))
}

/// Claimable dividends for a holder, mirroring the ledger's checkpoint
/// accounting
pub fn estimate_claimable(
    math: &dyn IntegerMath,
    franchise: &Franchise,
    balance: u64,
    already_claimed: u64,
) -> Result<u64, ClientError> {
    let entitlement = math
        .mul_div_floor(balance, franchise.total_revenue, franchise.total_shares)
        .ok_or(ClientError::Math("dividend entitlement"))?;
    Ok(entitlement.saturating_sub(already_claimed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_client::anchor_lang::InstructionData;
    use anchor_client::Cluster;
    use std::path::PathBuf;

    fn fixture_franchise() -> Franchise {
        Franchise {
            business: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            slug: "outlet-1".to_string(),
            location_address: "12 Hill Road".to_string(),
            building_name: "Crystal Plaza".to_string(),
            carpet_area: 500,
            cost_per_area: 2_000,
            total_investment: 1_000_000,
            total_shares: 1_000,
            sold_shares: 400,
            total_raised: 400_000,
            capital_recovered: 0,
            total_revenue: 10_000,
            pending_dividends: 10_000,
            status: FranchiseStatus::Funding,
            token_mint: Pubkey::new_unique(),
            created_at: 0,
            last_payout: 0,
            bump: 255,
            vault_bump: 254,
        }
    }

    #[test]
    fn connect_with_unreadable_keypair_is_unavailable() {
        let config = ClientConfig {
            cluster: Cluster::Localnet,
            program_id: franchise_program::ID,
            keypair_path: PathBuf::from("/nonexistent/path/id.json"),
            commitment: CommitmentConfig::confirmed(),
        };

        let result = FranchiseClient::connect(config);
        assert!(matches!(result, Err(ClientError::Unavailable(_))));
    }

    #[test]
    fn instruction_encoding_is_deterministic() {
        let first = franchise_program::instruction::InvestInFranchise { shares_to_buy: 600 }.data();
        let second = franchise_program::instruction::InvestInFranchise { shares_to_buy: 600 }.data();
        assert_eq!(first, second);
        // 8-byte discriminator + u64 argument
        assert_eq!(first.len(), 16);

        let other = franchise_program::instruction::InvestInFranchise { shares_to_buy: 601 }.data();
        assert_eq!(first[..8], other[..8]);
        assert_ne!(first[8..], other[8..]);
    }

    #[test]
    fn claim_instruction_is_discriminator_only() {
        let data = franchise_program::instruction::ClaimDividends {}.data();
        assert_eq!(data.len(), 8);
    }

    #[test]
    fn cost_estimate_floors_the_per_share_price() {
        let mut franchise = fixture_franchise();
        franchise.total_investment = 999_999;
        // price floors to 999
        assert_eq!(
            estimate_investment_cost(&WideMath, &franchise, 3).unwrap(),
            2997
        );
    }

    #[test]
    fn claimable_estimate_matches_the_checkpoint_model() {
        let franchise = fixture_franchise();
        assert_eq!(
            estimate_claimable(&WideMath, &franchise, 250, 0).unwrap(),
            2500
        );
        assert_eq!(
            estimate_claimable(&WideMath, &franchise, 250, 2500).unwrap(),
            0
        );
        assert_eq!(
            estimate_claimable(&WideMath, &franchise, 0, 0).unwrap(),
            0
        );
    }

    #[test]
    fn estimates_surface_math_capability_limits() {
        let mut franchise = fixture_franchise();
        franchise.total_investment = u64::MAX;
        franchise.total_shares = 1;

        assert!(matches!(
            estimate_investment_cost(&crate::math::SafeMath, &franchise, 2),
            Err(ClientError::Math(_))
        ));
        assert!(matches!(
            estimate_investment_cost(&WideMath, &franchise, 2),
            Err(ClientError::Math(_))
        ));
        assert_eq!(
            estimate_investment_cost(&WideMath, &franchise, 1).unwrap(),
            u64::MAX
        );
    }
}
