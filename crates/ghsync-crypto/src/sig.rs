use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::errors::CryptoError;

/// Prefix of the `X-Hub-Signature` header value.
pub const SIGNATURE_PREFIX: &str = "sha1=";

type HmacSha1 = Hmac<Sha1>;

/// Signature, as the hex digest without its prefix.
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Extract the signature from a `sha1=<hex>` header value.
    pub fn from_header(header: &'a str) -> Result<Self, CryptoError> {
        header
            .strip_prefix(SIGNATURE_PREFIX)
            .filter(|sig| !sig.is_empty())
            .map(Self)
            .ok_or_else(|| CryptoError::InvalidSignatureFormat {
                sig: header.to_string(),
            })
    }

    /// Check if a signature is valid.
    ///
    /// The digest comparison runs in constant time.
    pub fn is_valid(&self, body: &[u8], secret: &str) -> Result<bool, CryptoError> {
        // GitHub sends lowercase digests only.
        if self.0.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            });
        }

        let decoded_signature =
            &hex::decode(self.0).map_err(|_| CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            })?;

        let mut hmac = new_hmac(secret)?;
        hmac.update(body);
        Ok(hmac.verify_slice(decoded_signature).is_ok())
    }

    /// Compute the hex digest of a body.
    pub fn compute_hex(body: &[u8], secret: &str) -> Result<String, CryptoError> {
        let mut hmac = new_hmac(secret)?;
        hmac.update(body);
        Ok(hex::encode(hmac.finalize().into_bytes()))
    }

    /// Compute the full header value of a body.
    pub fn compute_header(body: &[u8], secret: &str) -> Result<String, CryptoError> {
        Ok(format!("{SIGNATURE_PREFIX}{}", Self::compute_hex(body, secret)?))
    }
}

fn new_hmac(secret: &str) -> Result<HmacSha1, CryptoError> {
    HmacSha1::new_from_slice(secret.as_bytes()).map_err(|_| CryptoError::InvalidSecretKeyLength {
        key: secret.to_string(),
    })
}
