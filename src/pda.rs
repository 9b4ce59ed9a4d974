use solana_program::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};

use crate::error::VaultClientError;
use crate::state::VaultAddresses;

/// Seed prefix for the vault authority PDA
pub const AUTH_SEED: &[u8] = b"auth";

/// Seed prefix for the native vault PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed prefix for enrollment record PDAs
pub const ENROLLMENT_SEED: &[u8] = b"prereq";

/// Derive a program address from an ordered seed list.
///
/// Pure and deterministic: the same seeds and program id always yield the
/// same (address, bump) pair. The bump is whatever the protocol's downward
/// scan from 255 lands on first; callers must echo it back to the program
/// unchanged, never recompute it another way.
pub fn derive_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), VaultClientError> {
    // The bump byte occupies one seed slot during the search.
    if seeds.len() >= MAX_SEEDS {
        return Err(VaultClientError::InvalidSeed(format!(
            "{} seeds exceed the maximum of {}",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(VaultClientError::InvalidSeed(format!(
                "seed of {} bytes exceeds the maximum of {}",
                seed.len(),
                MAX_SEED_LEN
            )));
        }
    }

    Pubkey::try_find_program_address(seeds, program_id).ok_or(VaultClientError::NoValidAddress)
}

/// Derive the vault authority PDA from a vault state address
pub fn derive_vault_authority(
    program_id: &Pubkey,
    vault_state: &Pubkey,
) -> Result<(Pubkey, u8), VaultClientError> {
    derive_address(&[AUTH_SEED, vault_state.as_ref()], program_id)
}

/// Derive the native vault PDA from the vault authority address
pub fn derive_vault(
    program_id: &Pubkey,
    vault_authority: &Pubkey,
) -> Result<(Pubkey, u8), VaultClientError> {
    derive_address(&[VAULT_SEED, vault_authority.as_ref()], program_id)
}

/// Derive the enrollment record PDA for a signer
pub fn derive_enrollment(
    program_id: &Pubkey,
    signer: &Pubkey,
) -> Result<(Pubkey, u8), VaultClientError> {
    derive_address(&[ENROLLMENT_SEED, signer.as_ref()], program_id)
}

/// Derive the full address chain rooted at a vault state account.
///
/// The authority depends only on the vault state address and the vault only
/// on the authority, so the whole chain is recomputed on demand and never
/// persisted.
pub fn derive_vault_addresses(
    program_id: &Pubkey,
    vault_state: &Pubkey,
) -> Result<VaultAddresses, VaultClientError> {
    let (authority, authority_bump) = derive_vault_authority(program_id, vault_state)?;
    let (vault, vault_bump) = derive_vault(program_id, &authority)?;

    Ok(VaultAddresses {
        vault_state: *vault_state,
        authority,
        authority_bump,
        vault,
        vault_bump,
    })
}
