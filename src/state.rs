use solana_program::pubkey::Pubkey;
use solana_sdk::{clock::Slot, signature::Signature};

/// Address chain for one vault, rooted at its state account.
///
/// Nothing here is read from the ledger: every field is recomputed from the
/// vault state address, so the bundle can be rebuilt anywhere at any time
/// and is never treated as authoritative stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAddresses {
    /// The vault state account, root identity of the chain
    pub vault_state: Pubkey,
    /// Program-owned signing authority, seeds `["auth", vault_state]`
    pub authority: Pubkey,
    /// Bump for the authority derivation, echoed to the program as-is
    pub authority_bump: u8,
    /// Native holding address, seeds `["vault", authority]`
    pub vault: Pubkey,
    /// Bump for the vault derivation
    pub vault_bump: u8,
}

/// A provisioned associated token account for one (owner, mint) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldingAccount {
    /// The deterministic account address
    pub address: Pubkey,
    /// Wallet or authority the balance belongs to
    pub owner: Pubkey,
    /// Token mint the account holds
    pub mint: Pubkey,
    /// Whether this call had to create the account
    pub created: bool,
}

/// Outcome of a transaction confirmed at the requested commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Signature identifying the transaction on the ledger
    pub signature: Signature,
    /// Slot at which the commitment was observed
    pub slot: Slot,
}
