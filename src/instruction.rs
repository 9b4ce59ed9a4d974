use borsh::BorshSerialize;
use sha2::{Digest, Sha256};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::error::VaultClientError;

/// First eight bytes of `sha256("global:<method>")`, the dispatch key the
/// on-chain interface expects in front of the borsh-encoded arguments.
pub fn discriminator(method: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{}", method).as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    bytes
}

/// Instructions understood by the vault program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultInstruction {
    /// Create a new vault rooted at a fresh vault state account
    ///
    /// Accounts expected:
    /// 0. [signer, writable] Vault owner
    /// 1. [signer, writable] Vault state account (fresh keypair)
    /// 2. [] Vault authority PDA
    /// 3. [writable] Vault PDA
    /// 4. [] System program
    Initialize,

    /// Deposit native lamports into the vault
    ///
    /// Accounts expected:
    /// 0. [signer, writable] Vault owner
    /// 1. [writable] Vault state account
    /// 2. [] Vault authority PDA
    /// 3. [writable] Vault PDA
    /// 4. [] System program
    Deposit { amount: u64 },

    /// Withdraw native lamports from the vault
    ///
    /// Accounts expected: same as Deposit
    Withdraw { amount: u64 },

    /// Deposit tokens from the owner's holding account into the vault's
    ///
    /// Accounts expected:
    /// 0. [signer, writable] Vault owner
    /// 1. [writable] Owner holding account
    /// 2. [writable] Vault state account
    /// 3. [] Vault authority PDA
    /// 4. [writable] Vault holding account
    /// 5. [] Token mint
    /// 6. [] SPL Token program
    /// 7. [] System program
    DepositSpl { amount: u64 },

    /// Withdraw tokens from the vault's holding account to the owner's
    ///
    /// Accounts expected: same as DepositSpl
    WithdrawSpl { amount: u64 },
}

/// Named account slots for vault instructions.
///
/// Each operation pulls exactly the slots it requires; an empty required
/// slot fails the build before anything touches the network.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VaultAccounts {
    pub owner: Option<Pubkey>,
    pub vault_state: Option<Pubkey>,
    pub vault_auth: Option<Pubkey>,
    pub vault: Option<Pubkey>,
    pub owner_token: Option<Pubkey>,
    pub vault_token: Option<Pubkey>,
    pub token_mint: Option<Pubkey>,
}

fn require(slot: Option<Pubkey>, name: &'static str) -> Result<Pubkey, VaultClientError> {
    slot.ok_or(VaultClientError::IncompleteAccountSet(name))
}

impl VaultInstruction {
    /// Method name the discriminator is computed from
    pub fn method_name(&self) -> &'static str {
        match self {
            VaultInstruction::Initialize => "initialize",
            VaultInstruction::Deposit { .. } => "deposit",
            VaultInstruction::Withdraw { .. } => "withdraw",
            VaultInstruction::DepositSpl { .. } => "deposit_spl",
            VaultInstruction::WithdrawSpl { .. } => "withdraw_spl",
        }
    }

    /// Base-unit amount the operation carries, if any
    pub fn amount(&self) -> Option<u64> {
        match self {
            VaultInstruction::Initialize => None,
            VaultInstruction::Deposit { amount }
            | VaultInstruction::Withdraw { amount }
            | VaultInstruction::DepositSpl { amount }
            | VaultInstruction::WithdrawSpl { amount } => Some(*amount),
        }
    }

    /// Reject a zero amount on amount-bearing operations
    pub fn validate_amount(&self) -> Result<(), VaultClientError> {
        if self.amount() == Some(0) {
            return Err(VaultClientError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Wire encoding: discriminator followed by borsh-encoded arguments
    pub fn data(&self) -> Vec<u8> {
        let mut data = discriminator(self.method_name()).to_vec();
        if let Some(amount) = self.amount() {
            data.extend_from_slice(&amount.try_to_vec().unwrap());
        }
        data
    }

    /// Assemble the instruction with the exact ordered account list the
    /// program expects. Amount-bearing operations reject a zero amount and
    /// every required slot must be populated; both checks run before any
    /// network contact.
    pub fn build(
        &self,
        program_id: &Pubkey,
        accounts: &VaultAccounts,
    ) -> Result<Instruction, VaultClientError> {
        self.validate_amount()?;

        let owner = require(accounts.owner, "owner")?;
        let vault_state = require(accounts.vault_state, "vault_state")?;
        let vault_auth = require(accounts.vault_auth, "vault_auth")?;

        let metas = match self {
            VaultInstruction::Initialize
            | VaultInstruction::Deposit { .. }
            | VaultInstruction::Withdraw { .. } => {
                let vault = require(accounts.vault, "vault")?;
                // The vault state keypair co-signs account creation at init.
                let vault_state_signs = matches!(self, VaultInstruction::Initialize);
                vec![
                    AccountMeta::new(owner, true),
                    AccountMeta::new(vault_state, vault_state_signs),
                    AccountMeta::new_readonly(vault_auth, false),
                    AccountMeta::new(vault, false),
                    AccountMeta::new_readonly(system_program::id(), false),
                ]
            }
            VaultInstruction::DepositSpl { .. } | VaultInstruction::WithdrawSpl { .. } => {
                let owner_token = require(accounts.owner_token, "owner_token")?;
                let vault_token = require(accounts.vault_token, "vault_token")?;
                let token_mint = require(accounts.token_mint, "token_mint")?;
                vec![
                    AccountMeta::new(owner, true),
                    AccountMeta::new(owner_token, false),
                    AccountMeta::new(vault_state, false),
                    AccountMeta::new_readonly(vault_auth, false),
                    AccountMeta::new(vault_token, false),
                    AccountMeta::new_readonly(token_mint, false),
                    AccountMeta::new_readonly(spl_token::id(), false),
                    AccountMeta::new_readonly(system_program::id(), false),
                ]
            }
        };

        Ok(Instruction {
            program_id: *program_id,
            accounts: metas,
            data: self.data(),
        })
    }
}

/// Build the enrollment program's `complete` instruction
///
/// Accounts expected:
/// 0. [signer, writable] Enrolling signer
/// 1. [writable] Enrollment record PDA
/// 2. [] System program
pub fn enrollment_complete(
    program_id: &Pubkey,
    signer: &Pubkey,
    enrollment_record: &Pubkey,
    record: &[u8],
) -> Instruction {
    let mut data = discriminator("complete").to_vec();
    data.extend_from_slice(&record.to_vec().try_to_vec().unwrap());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new(*enrollment_record, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}
