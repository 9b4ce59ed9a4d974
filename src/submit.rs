use std::time::Instant;

use log::{debug, info, warn};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Signature, Signer},
    transaction::Transaction,
};

use crate::config::ClientConfig;
use crate::error::VaultClientError;
use crate::rpc::LedgerRpc;
use crate::state::TransactionReceipt;

/// Submit instructions as one atomic transaction and wait for confirmation.
///
/// The signer set must cover every signature the message requires; a gap is
/// reported before anything is broadcast. After broadcast the call blocks,
/// polling until the transaction reaches the configured commitment, fails on
/// the ledger, or the confirmation window closes. An expired blockhash is
/// retried exactly once with a fresh one and the same instructions; the
/// outcome of that second attempt is returned unmodified.
pub fn submit<R: LedgerRpc>(
    rpc: &R,
    config: &ClientConfig,
    instructions: &[Instruction],
    payer: &Pubkey,
    signers: &[&dyn Signer],
) -> Result<TransactionReceipt, VaultClientError> {
    match submit_once(rpc, config, instructions, payer, signers) {
        Err(VaultClientError::BlockhashExpired) => {
            warn!("blockhash expired; resubmitting once with a fresh one");
            submit_once(rpc, config, instructions, payer, signers)
        }
        outcome => outcome,
    }
}

fn submit_once<R: LedgerRpc>(
    rpc: &R,
    config: &ClientConfig,
    instructions: &[Instruction],
    payer: &Pubkey,
    signers: &[&dyn Signer],
) -> Result<TransactionReceipt, VaultClientError> {
    let message = Message::new(instructions, Some(payer));
    verify_signer_coverage(&message, signers)?;

    let blockhash = rpc.latest_blockhash()?;
    let mut transaction = Transaction::new_unsigned(message);
    transaction
        .try_sign(&signers.to_vec(), blockhash)
        .map_err(|err| VaultClientError::InvalidKeyMaterial(err.to_string()))?;

    let signature = rpc.send_transaction(&transaction)?;
    debug!(
        "transaction {} broadcast with {} instruction(s); awaiting {}",
        signature,
        instructions.len(),
        config.commitment.commitment
    );
    await_commitment(rpc, config, &signature, &blockhash)
}

/// Check that every required signer of the message is present in the set
fn verify_signer_coverage(
    message: &Message,
    signers: &[&dyn Signer],
) -> Result<(), VaultClientError> {
    for required in message.signer_keys() {
        if !signers.iter().any(|signer| signer.pubkey() == *required) {
            return Err(VaultClientError::MissingSignature(*required));
        }
    }
    Ok(())
}

fn await_commitment<R: LedgerRpc>(
    rpc: &R,
    config: &ClientConfig,
    signature: &Signature,
    blockhash: &Hash,
) -> Result<TransactionReceipt, VaultClientError> {
    let deadline = Instant::now() + config.confirm_timeout;
    loop {
        match rpc.signature_status(signature)? {
            Some(status) => {
                if let Some(err) = status.err {
                    return Err(VaultClientError::LedgerRejected(err.to_string()));
                }
                if status.satisfies_commitment(config.commitment) {
                    info!("transaction {} confirmed at slot {}", signature, status.slot);
                    return Ok(TransactionReceipt {
                        signature: *signature,
                        slot: status.slot,
                    });
                }
            }
            // Unobserved. Once the blockhash dies the transaction can no
            // longer land, so waiting further is pointless.
            None => {
                if !rpc.is_blockhash_valid(blockhash, config.commitment)? {
                    return Err(VaultClientError::BlockhashExpired);
                }
            }
        }

        if Instant::now() >= deadline {
            return Err(VaultClientError::Timeout(config.confirm_timeout));
        }
        std::thread::sleep(config.poll_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{instruction::AccountMeta, signature::Keypair};

    fn two_signer_message(payer: &Keypair, co_signer: &Pubkey) -> Message {
        let instruction = Instruction {
            program_id: Pubkey::new_unique(),
            accounts: vec![
                AccountMeta::new(payer.pubkey(), true),
                AccountMeta::new(*co_signer, true),
            ],
            data: vec![],
        };
        Message::new(&[instruction], Some(&payer.pubkey()))
    }

    #[test]
    fn test_missing_signer_is_named() {
        let payer = Keypair::new();
        let co_signer = Pubkey::new_unique();
        let message = two_signer_message(&payer, &co_signer);

        let signers: Vec<&dyn Signer> = vec![&payer];
        let result = verify_signer_coverage(&message, &signers);
        assert_eq!(
            result.unwrap_err(),
            VaultClientError::MissingSignature(co_signer)
        );
    }

    #[test]
    fn test_full_signer_set_passes() {
        let payer = Keypair::new();
        let co_signer = Keypair::new();
        let message = two_signer_message(&payer, &co_signer.pubkey());

        let signers: Vec<&dyn Signer> = vec![&payer, &co_signer];
        assert!(verify_signer_coverage(&message, &signers).is_ok());
    }

    #[test]
    fn test_extra_signers_are_tolerated() {
        let payer = Keypair::new();
        let co_signer = Keypair::new();
        let bystander = Keypair::new();
        let message = two_signer_message(&payer, &co_signer.pubkey());

        let signers: Vec<&dyn Signer> = vec![&payer, &co_signer, &bystander];
        assert!(verify_signer_coverage(&message, &signers).is_ok());
    }
}
