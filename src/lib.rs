//! Client-side orchestration for the WBA vault program.
//!
//! Derives the vault's program addresses from its state account, provisions
//! associated token accounts on first use, assembles instructions with the
//! exact account sets the program expects, and submits them as single
//! confirmed transactions. Addresses are never stored; they are recomputed
//! from seeds on every call.

// Client modules
pub mod amount;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod instruction;
pub mod pda;
pub mod provision;
pub mod rpc;
pub mod state;
pub mod submit;

// Re-exports for external use
pub use client::VaultClient;
pub use config::ClientConfig;
pub use error::VaultClientError;
pub use instruction::{VaultAccounts, VaultInstruction};
pub use rpc::LedgerRpc;
pub use state::{HoldingAccount, TransactionReceipt, VaultAddresses};

use solana_program::pubkey::Pubkey;

/// Devnet deployment of the vault program this client targets
pub const VAULT_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("D51uEDHLbWAxNfodfQDv7qkp8WZtxrhi3uganGbNos7o");

/// Companion enrollment program consuming the `complete` instruction
pub const ENROLLMENT_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("HC2oqz2p6DEWfrahenqdq2moUcga9c9biqRBcdK3XKU1");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_ids_match_known_deployments() {
        assert_eq!(
            VAULT_PROGRAM_ID.to_string(),
            "D51uEDHLbWAxNfodfQDv7qkp8WZtxrhi3uganGbNos7o"
        );
        assert_eq!(
            ENROLLMENT_PROGRAM_ID.to_string(),
            "HC2oqz2p6DEWfrahenqdq2moUcga9c9biqRBcdK3XKU1"
        );
        assert_ne!(VAULT_PROGRAM_ID, ENROLLMENT_PROGRAM_ID);
    }
}
