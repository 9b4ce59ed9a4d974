use std::time::Duration;

use solana_program::pubkey::Pubkey;
use thiserror::Error;

/// Failure taxonomy for the vault client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultClientError {
    /// A derivation seed breaks the protocol limits
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// No bump in the search range maps the seeds off the curve
    #[error("no valid program address for the given seeds")]
    NoValidAddress,

    /// Holding-account owner is off the curve and off-curve owners were not allowed
    #[error("owner {0} has no private key; off-curve owners must be allowed explicitly")]
    InvalidOwner(Pubkey),

    /// A required account slot was left empty when building an instruction
    #[error("account set incomplete: missing {0}")]
    IncompleteAccountSet(&'static str),

    /// Amount failed local validation
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A human amount carries more fractional digits than the asset supports
    #[error("precision loss: {amount} does not fit in {decimals} decimals")]
    PrecisionLoss { amount: String, decimals: u8 },

    /// A signature the transaction requires is absent from the signer set
    #[error("missing signature for {0}")]
    MissingSignature(Pubkey),

    /// Preflight simulation rejected the transaction
    #[error("simulation failure: {0}")]
    SimulationFailure(String),

    /// The recent blockhash went stale before the transaction landed
    #[error("blockhash expired before confirmation")]
    BlockhashExpired,

    /// Confirmation did not reach the requested commitment in time
    #[error("confirmation timed out after {0:?}")]
    Timeout(Duration),

    /// The ledger processed and rejected the transaction
    #[error("ledger rejected transaction: {0}")]
    LedgerRejected(String),

    /// Secret bytes do not encode a usable keypair
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// An account the operation needs does not exist on the ledger
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    /// The account exists but its owner or layout is not what was expected
    #[error("account {0} does not hold the expected data")]
    InvalidAccountData(Pubkey),

    /// Transport-level RPC failure
    #[error("rpc transport error: {0}")]
    Rpc(String),
}

impl VaultClientError {
    /// True for failures produced by local validation, before any network
    /// round trip. These indicate a caller bug and are never worth retrying.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            VaultClientError::InvalidSeed(_)
                | VaultClientError::NoValidAddress
                | VaultClientError::InvalidOwner(_)
                | VaultClientError::IncompleteAccountSet(_)
                | VaultClientError::InvalidAmount(_)
                | VaultClientError::PrecisionLoss { .. }
                | VaultClientError::MissingSignature(_)
                | VaultClientError::InvalidKeyMaterial(_)
        )
    }
}
