use log::{debug, info};
use solana_program::program_pack::Pack;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use spl_token::state::Mint;

use crate::config::ClientConfig;
use crate::error::VaultClientError;
use crate::instruction::{self, VaultAccounts, VaultInstruction};
use crate::pda;
use crate::provision;
use crate::rpc::LedgerRpc;
use crate::state::{HoldingAccount, TransactionReceipt, VaultAddresses};
use crate::submit;

/// Orchestrator for one vault program on one endpoint.
///
/// The client is an immutable bundle of endpoint, program identity and
/// confirmation settings; every operation recomputes the addresses it needs
/// from its arguments, provisions any missing holding accounts, assembles
/// the instruction and submits it as a single confirmed transaction.
/// Operations on distinct vaults or assets are independent and may run
/// concurrently from separate clients.
#[derive(Debug)]
pub struct VaultClient<R> {
    rpc: R,
    program_id: Pubkey,
    config: ClientConfig,
}

impl<R: LedgerRpc> VaultClient<R> {
    pub fn new(rpc: R, program_id: Pubkey, config: ClientConfig) -> Self {
        Self {
            rpc,
            program_id,
            config,
        }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Recompute the authority and vault addresses for a vault state account
    pub fn vault_addresses(&self, vault_state: &Pubkey) -> Result<VaultAddresses, VaultClientError> {
        pda::derive_vault_addresses(&self.program_id, vault_state)
    }

    /// Create a new vault rooted at the given fresh vault state keypair.
    ///
    /// The vault state account co-signs its own creation, so both the owner
    /// and the vault state keypairs are required.
    pub fn initialize(
        &self,
        owner: &Keypair,
        vault_state: &Keypair,
    ) -> Result<TransactionReceipt, VaultClientError> {
        let addresses = self.vault_addresses(&vault_state.pubkey())?;
        let instruction = VaultInstruction::Initialize
            .build(&self.program_id, &self.native_accounts(owner, &addresses))?;

        info!(
            "initializing vault {} (authority {}, vault {})",
            addresses.vault_state, addresses.authority, addresses.vault
        );
        let signers: [&dyn Signer; 2] = [owner, vault_state];
        submit::submit(
            &self.rpc,
            &self.config,
            &[instruction],
            &owner.pubkey(),
            &signers,
        )
    }

    /// Deposit native lamports into the vault
    pub fn deposit(
        &self,
        owner: &Keypair,
        vault_state: &Pubkey,
        amount: u64,
    ) -> Result<TransactionReceipt, VaultClientError> {
        self.native_operation(VaultInstruction::Deposit { amount }, owner, vault_state)
    }

    /// Withdraw native lamports from the vault
    pub fn withdraw(
        &self,
        owner: &Keypair,
        vault_state: &Pubkey,
        amount: u64,
    ) -> Result<TransactionReceipt, VaultClientError> {
        self.native_operation(VaultInstruction::Withdraw { amount }, owner, vault_state)
    }

    /// Deposit base units of `mint` into the vault's holding account
    pub fn deposit_token(
        &self,
        owner: &Keypair,
        vault_state: &Pubkey,
        mint: &Pubkey,
        amount: u64,
    ) -> Result<TransactionReceipt, VaultClientError> {
        self.token_operation(
            VaultInstruction::DepositSpl { amount },
            owner,
            vault_state,
            mint,
        )
    }

    /// Withdraw base units of `mint` back to the owner's holding account
    pub fn withdraw_token(
        &self,
        owner: &Keypair,
        vault_state: &Pubkey,
        mint: &Pubkey,
        amount: u64,
    ) -> Result<TransactionReceipt, VaultClientError> {
        self.token_operation(
            VaultInstruction::WithdrawSpl { amount },
            owner,
            vault_state,
            mint,
        )
    }

    /// Look up or create the holding account for (owner, mint)
    pub fn ensure_holding_account(
        &self,
        payer: &Keypair,
        owner: &Pubkey,
        mint: &Pubkey,
        allow_off_curve: bool,
    ) -> Result<HoldingAccount, VaultClientError> {
        provision::ensure_holding_account(&self.rpc, &self.config, payer, owner, mint, allow_off_curve)
    }

    /// Submit the enrollment program's `complete` instruction for `signer`
    pub fn complete_enrollment(
        &self,
        enrollment_program: &Pubkey,
        signer: &Keypair,
        record: &[u8],
    ) -> Result<TransactionReceipt, VaultClientError> {
        let (record_address, _) = pda::derive_enrollment(enrollment_program, &signer.pubkey())?;
        let instruction = instruction::enrollment_complete(
            enrollment_program,
            &signer.pubkey(),
            &record_address,
            record,
        );

        info!(
            "completing enrollment for {} at record {}",
            signer.pubkey(),
            record_address
        );
        let signers: [&dyn Signer; 1] = [signer];
        submit::submit(
            &self.rpc,
            &self.config,
            &[instruction],
            &signer.pubkey(),
            &signers,
        )
    }

    /// Read the decimals attribute of a token mint
    pub fn mint_decimals(&self, mint: &Pubkey) -> Result<u8, VaultClientError> {
        let account = self
            .rpc
            .get_account(mint)?
            .ok_or(VaultClientError::AccountNotFound(*mint))?;
        if account.owner != spl_token::id() {
            return Err(VaultClientError::InvalidAccountData(*mint));
        }
        let mint_state =
            Mint::unpack(&account.data).map_err(|_| VaultClientError::InvalidAccountData(*mint))?;
        Ok(mint_state.decimals)
    }

    fn native_accounts(&self, owner: &Keypair, addresses: &VaultAddresses) -> VaultAccounts {
        VaultAccounts {
            owner: Some(owner.pubkey()),
            vault_state: Some(addresses.vault_state),
            vault_auth: Some(addresses.authority),
            vault: Some(addresses.vault),
            ..VaultAccounts::default()
        }
    }

    fn native_operation(
        &self,
        instruction: VaultInstruction,
        owner: &Keypair,
        vault_state: &Pubkey,
    ) -> Result<TransactionReceipt, VaultClientError> {
        let addresses = self.vault_addresses(vault_state)?;
        let instruction = instruction.build(&self.program_id, &self.native_accounts(owner, &addresses))?;

        debug!("vault {} native operation by {}", vault_state, owner.pubkey());
        let signers: [&dyn Signer; 1] = [owner];
        submit::submit(
            &self.rpc,
            &self.config,
            &[instruction],
            &owner.pubkey(),
            &signers,
        )
    }

    fn token_operation(
        &self,
        instruction: VaultInstruction,
        owner: &Keypair,
        vault_state: &Pubkey,
        mint: &Pubkey,
    ) -> Result<TransactionReceipt, VaultClientError> {
        // Amount validation must not wait for provisioning round trips.
        instruction.validate_amount()?;

        let addresses = self.vault_addresses(vault_state)?;
        let owner_token = self.ensure_holding_account(owner, &owner.pubkey(), mint, false)?;
        // The vault side belongs to the derived authority, which has no
        // private key.
        let vault_token = self.ensure_holding_account(owner, &addresses.authority, mint, true)?;

        let accounts = VaultAccounts {
            owner: Some(owner.pubkey()),
            vault_state: Some(addresses.vault_state),
            vault_auth: Some(addresses.authority),
            owner_token: Some(owner_token.address),
            vault_token: Some(vault_token.address),
            token_mint: Some(*mint),
            ..VaultAccounts::default()
        };
        let instruction = instruction.build(&self.program_id, &accounts)?;

        debug!(
            "vault {} token operation on mint {} by {}",
            vault_state,
            mint,
            owner.pubkey()
        );
        let signers: [&dyn Signer; 1] = [owner];
        submit::submit(
            &self.rpc,
            &self.config,
            &[instruction],
            &owner.pubkey(),
            &signers,
        )
    }
}
