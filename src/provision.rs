use log::{debug, info};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};

use crate::config::ClientConfig;
use crate::error::VaultClientError;
use crate::rpc::LedgerRpc;
use crate::state::HoldingAccount;
use crate::submit;

/// Look up the holding account for one (owner, mint) pair, creating it if
/// it does not exist yet.
///
/// The address is the associated token account derivation, so repeated and
/// concurrent calls converge on the same account. Creation uses the token
/// program's idempotent instruction and a losing race against another
/// creator counts as success: the ledger arbitrates duplicates, not a
/// client-side lock. `allow_off_curve` must be set when the owner is a
/// derived program authority with no private key; otherwise such owners are
/// rejected before any network call.
pub fn ensure_holding_account<R: LedgerRpc>(
    rpc: &R,
    config: &ClientConfig,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
    allow_off_curve: bool,
) -> Result<HoldingAccount, VaultClientError> {
    if !allow_off_curve && !owner.is_on_curve() {
        return Err(VaultClientError::InvalidOwner(*owner));
    }

    let address = get_associated_token_address(owner, mint);
    if holding_account_exists(rpc, &address)? {
        debug!(
            "holding account {} for owner {} already provisioned",
            address, owner
        );
        return Ok(HoldingAccount {
            address,
            owner: *owner,
            mint: *mint,
            created: false,
        });
    }

    let create =
        create_associated_token_account_idempotent(&payer.pubkey(), owner, mint, &spl_token::id());
    let signers: [&dyn Signer; 1] = [payer];
    if let Err(error) = submit::submit(rpc, config, &[create], &payer.pubkey(), &signers) {
        // A rejected creation is still a success if the account is there
        // now: a concurrent creator won the race.
        if error.is_local() || !holding_account_exists(rpc, &address)? {
            return Err(error);
        }
        debug!(
            "creation of {} rejected but the account exists; treating as success",
            address
        );
    }

    info!("provisioned holding account {} for owner {}", address, owner);
    Ok(HoldingAccount {
        address,
        owner: *owner,
        mint: *mint,
        created: true,
    })
}

/// Whether the holding account is already usable.
///
/// A token-program account is; a system-owned lamport stub is not (the
/// idempotent create completes it); anything else means a foreign program
/// occupies the derived address.
fn holding_account_exists<R: LedgerRpc>(
    rpc: &R,
    address: &Pubkey,
) -> Result<bool, VaultClientError> {
    match rpc.get_account(address)? {
        Some(account) if account.owner == spl_token::id() => Ok(true),
        Some(account) if account.owner == system_program::id() => Ok(false),
        Some(_) => Err(VaultClientError::InvalidAccountData(*address)),
        None => Ok(false),
    }
}
