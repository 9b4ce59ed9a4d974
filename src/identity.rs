use solana_sdk::signature::Keypair;

use crate::error::VaultClientError;

/// Length of the raw secret material: 32 secret bytes followed by the
/// 32-byte public key, the layout wallet exports use.
pub const SECRET_KEY_LEN: usize = 64;

/// Validate raw secret bytes into a signing identity.
///
/// This is the only place raw key material crosses into the crate; every
/// operation past this boundary works with a constructed `Keypair`. The
/// fixed-length array rules out truncated input at the type level and the
/// conversion rejects bytes whose public half does not match the secret.
pub fn keypair_from_secret_bytes(
    secret: &[u8; SECRET_KEY_LEN],
) -> Result<Keypair, VaultClientError> {
    Keypair::from_bytes(secret)
        .map_err(|err| VaultClientError::InvalidKeyMaterial(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;

    #[test]
    fn test_round_trips_a_generated_keypair() {
        let keypair = Keypair::new();
        let bytes: [u8; SECRET_KEY_LEN] = keypair.to_bytes();

        let restored = keypair_from_secret_bytes(&bytes).unwrap();
        assert_eq!(restored.pubkey(), keypair.pubkey());
        assert_eq!(restored.to_bytes(), bytes);
    }

    #[test]
    fn test_rejects_mismatched_public_half() {
        let mut bytes = Keypair::new().to_bytes();
        // Corrupt the public half so it no longer matches the secret.
        bytes[32] ^= 0xff;

        let result = keypair_from_secret_bytes(&bytes);
        assert!(matches!(
            result,
            Err(VaultClientError::InvalidKeyMaterial(_))
        ));
    }
}
