// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signature verifier contract.
//!
//! Implementations only answer accept/reject. Wiping the signature is done by
//! [`verify`], so no implementation can forget it.

use zeroize::Zeroize;

use crate::config::{AMOUNT_LEN, SIGNATURE_LEN};

pub trait SignatureVerifier {
    /// `true` iff `signature` is valid over `message`.
    fn check(&self, message: &[u8; AMOUNT_LEN], signature: &[u8; SIGNATURE_LEN]) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn check(&self, message: &[u8; AMOUNT_LEN], signature: &[u8; SIGNATURE_LEN]) -> bool {
        (**self).check(message, signature)
    }
}

/// Runs `verifier` and zeroes `signature` in place before returning,
/// whatever the verdict.
pub fn verify<V: SignatureVerifier + ?Sized>(
    verifier: &V,
    message: &[u8; AMOUNT_LEN],
    signature: &mut [u8; SIGNATURE_LEN],
) -> bool {
    let accepted = verifier.check(message, signature);
    signature.zeroize();
    accepted
}

#[cfg(feature = "ed25519")]
pub use self::ed25519::Ed25519Verifier;

#[cfg(feature = "ed25519")]
mod ed25519 {
    use ed25519_dalek::{Signature, VerifyingKey};

    use super::SignatureVerifier;
    use crate::config::{AMOUNT_LEN, SIGNATURE_LEN};
    use crate::error::{CoreError, CoreResult};

    /// Ed25519 (strict) over the little-endian amount bytes.
    #[derive(Clone, Debug)]
    pub struct Ed25519Verifier {
        key: VerifyingKey,
    }

    impl Ed25519Verifier {
        pub fn from_bytes(public_key: &[u8; 32]) -> CoreResult<Self> {
            let key = VerifyingKey::from_bytes(public_key).map_err(|_| CoreError::InvalidKey)?;
            Ok(Self { key })
        }

        pub fn public_key(&self) -> [u8; 32] {
            self.key.to_bytes()
        }
    }

    impl SignatureVerifier for Ed25519Verifier {
        fn check(&self, message: &[u8; AMOUNT_LEN], signature: &[u8; SIGNATURE_LEN]) -> bool {
            let signature = Signature::from_bytes(signature);
            self.key.verify_strict(message, &signature).is_ok()
        }
    }
}
