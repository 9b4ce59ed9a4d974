use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    rpc_client::RpcClient,
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use solana_transaction_status::TransactionStatus;

use crate::error::VaultClientError;

/// The ledger-facing calls a vault operation performs.
///
/// Operations are generic over this trait so the same control flow runs
/// against a real endpoint or a scripted ledger in tests. Implementations
/// map their transport errors into the `VaultClientError` taxonomy.
pub trait LedgerRpc {
    /// Fetch a recent blockhash to anchor a new transaction
    fn latest_blockhash(&self) -> Result<Hash, VaultClientError>;

    /// Fetch an account, `None` when it does not exist
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, VaultClientError>;

    /// Broadcast a signed transaction, returning its signature
    fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, VaultClientError>;

    /// Current status of a submitted transaction, `None` while unobserved
    fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionStatus>, VaultClientError>;

    /// Whether a blockhash can still anchor new transactions
    fn is_blockhash_valid(
        &self,
        blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> Result<bool, VaultClientError>;
}

impl LedgerRpc for RpcClient {
    fn latest_blockhash(&self) -> Result<Hash, VaultClientError> {
        self.get_latest_blockhash().map_err(map_client_error)
    }

    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, VaultClientError> {
        self.get_account_with_commitment(address, self.commitment())
            .map(|response| response.value)
            .map_err(map_client_error)
    }

    fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, VaultClientError> {
        RpcClient::send_transaction(self, transaction).map_err(map_client_error)
    }

    fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionStatus>, VaultClientError> {
        self.get_signature_statuses(&[*signature])
            .map(|response| response.value.into_iter().next().flatten())
            .map_err(map_client_error)
    }

    fn is_blockhash_valid(
        &self,
        blockhash: &Hash,
        commitment: CommitmentConfig,
    ) -> Result<bool, VaultClientError> {
        RpcClient::is_blockhash_valid(self, blockhash, commitment).map_err(map_client_error)
    }
}

/// Map an RPC client error into the closed taxonomy.
///
/// Preflight simulation rejections become `SimulationFailure` (except a
/// stale blockhash, which is `BlockhashExpired` so the submitter can
/// retry), processed-and-failed transactions become `LedgerRejected`, and
/// everything else is a transport fault.
fn map_client_error(error: ClientError) -> VaultClientError {
    match &error.kind {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
            message,
            ..
        }) => match &simulation.err {
            Some(TransactionError::BlockhashNotFound) => VaultClientError::BlockhashExpired,
            Some(transaction_error) => {
                let mut reason = transaction_error.to_string();
                if let Some(logs) = &simulation.logs {
                    if !logs.is_empty() {
                        reason = format!("{}; logs: {}", reason, logs.join(" | "));
                    }
                }
                VaultClientError::SimulationFailure(reason)
            }
            None => VaultClientError::SimulationFailure(message.clone()),
        },
        ClientErrorKind::TransactionError(TransactionError::BlockhashNotFound) => {
            VaultClientError::BlockhashExpired
        }
        ClientErrorKind::TransactionError(transaction_error) => {
            VaultClientError::LedgerRejected(transaction_error.to_string())
        }
        _ => VaultClientError::Rpc(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_response::RpcSimulateTransactionResult;
    use solana_sdk::instruction::InstructionError;

    fn preflight_failure(err: Option<TransactionError>, logs: Option<Vec<String>>) -> ClientError {
        ClientError {
            request: None,
            kind: ClientErrorKind::RpcError(RpcError::RpcResponseError {
                code: -32002,
                message: "Transaction simulation failed".to_string(),
                data: RpcResponseErrorData::SendTransactionPreflightFailure(
                    RpcSimulateTransactionResult {
                        err,
                        logs,
                        accounts: None,
                        units_consumed: None,
                        return_data: None,
                        inner_instructions: None,
                    },
                ),
            }),
        }
    }

    #[test]
    fn test_preflight_blockhash_not_found_maps_to_expired() {
        let mapped = map_client_error(preflight_failure(
            Some(TransactionError::BlockhashNotFound),
            None,
        ));
        assert_eq!(mapped, VaultClientError::BlockhashExpired);
    }

    #[test]
    fn test_preflight_program_error_maps_to_simulation_failure() {
        let mapped = map_client_error(preflight_failure(
            Some(TransactionError::InstructionError(
                0,
                InstructionError::Custom(6000),
            )),
            Some(vec!["Program log: insufficient vault balance".to_string()]),
        ));
        match mapped {
            VaultClientError::SimulationFailure(reason) => {
                assert!(reason.contains("custom program error"));
                assert!(reason.contains("insufficient vault balance"));
            }
            other => panic!("expected SimulationFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_processed_transaction_error_maps_to_rejection() {
        let error = ClientError {
            request: None,
            kind: ClientErrorKind::TransactionError(TransactionError::AlreadyProcessed),
        };
        assert!(matches!(
            map_client_error(error),
            VaultClientError::LedgerRejected(_)
        ));
    }

    #[test]
    fn test_transport_fault_maps_to_rpc() {
        let error = ClientError {
            request: None,
            kind: ClientErrorKind::Custom("connection refused".to_string()),
        };
        match map_client_error(error) {
            VaultClientError::Rpc(reason) => assert!(reason.contains("connection refused")),
            other => panic!("expected Rpc, got {other:?}"),
        }
    }
}
