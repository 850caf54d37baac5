//! Ed25519 curve operations
//!
//! Byte-level operations used by the software engine. Key material follows
//! the expanded-key convention: a private key is `SHA-512(seed)` with the
//! scalar half (bytes 0..32) clamped and the nonce prefix in bytes 32..64.
//! Every intermediate secret is written to the caller-provided scratch
//! buffer rather than kept in locals, so that one scrub of the scratch
//! region removes all traces.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use edgate_internal::constant_time::ct_eq;
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

/// Scratch bytes holding a 64-byte hash
const HASH: core::ops::Range<usize> = 0..64;

/// Scratch bytes holding a 32-byte secret scalar
const SCALAR: core::ops::Range<usize> = 64..96;

/// Minimum scratch size the operations need
pub const SCRATCH_REQUIRED: usize = 96;

/// Apply Ed25519 clamping to the first 32 bytes of `bytes`
pub fn clamp(bytes: &mut [u8]) {
    bytes[0] &= 248; // Clear lowest 3 bits
    bytes[31] &= 63; // Clear highest 2 bits
    bytes[31] |= 64; // Set second-highest bit
}

/// SHA-512 over the concatenation of `parts`, written into `out`
fn sha512_into(out: &mut [u8], parts: &[&[u8]]) {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_into(GenericArray::from_mut_slice(&mut out[..64]));
}

fn array32(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes[..32]);
    out
}

fn array64(bytes: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&bytes[..64]);
    out
}

/// Reduce a 64-byte hash held in scratch to a scalar
fn reduce_wide(hash: &[u8]) -> Zeroizing<Scalar> {
    let wide = Zeroizing::new(array64(hash));
    Zeroizing::new(Scalar::from_bytes_mod_order_wide(&wide))
}

/// Interpret the first 32 bytes as a scalar, reducing mod L
fn scalar_mod_order(bytes: &[u8]) -> Zeroizing<Scalar> {
    let raw = Zeroizing::new(array32(bytes));
    Zeroizing::new(Scalar::from_bytes_mod_order(*raw))
}

fn decompress(public_key: &[u8]) -> Option<EdwardsPoint> {
    CompressedEdwardsY(array32(public_key)).decompress()
}

/// Public key A = \[a\]B for the scalar half of a private key
pub fn derive_public_key(out_public_key: &mut [u8], private_key: &[u8], scratch: &mut [u8]) {
    scratch[SCALAR].copy_from_slice(&private_key[..32]);
    let a = scalar_mod_order(&scratch[SCALAR]);
    let point = &*a * ED25519_BASEPOINT_TABLE;
    out_public_key[..32].copy_from_slice(point.compress().as_bytes());
}

/// Expand a seed into a private key and derive the matching public key
pub fn create_keypair(
    out_public_key: &mut [u8],
    out_private_key: &mut [u8],
    seed: &[u8],
    scratch: &mut [u8],
) {
    sha512_into(&mut scratch[HASH], &[&seed[..32]]);
    clamp(&mut scratch[HASH]);
    out_private_key[..64].copy_from_slice(&scratch[HASH]);
    derive_public_key(out_public_key, out_private_key, scratch);
}

/// Deterministic Ed25519 signature
///
/// 1. r = SHA-512(prefix || message) mod L
/// 2. R = \[r\]B
/// 3. k = SHA-512(R || A || message) mod L
/// 4. s = (r + k*a) mod L
pub fn sign(
    out_signature: &mut [u8],
    message: &[u8],
    public_key: &[u8],
    private_key: &[u8],
    scratch: &mut [u8],
) {
    sha512_into(&mut scratch[HASH], &[&private_key[32..64], message]);
    let r = reduce_wide(&scratch[HASH]);
    let big_r = (&*r * ED25519_BASEPOINT_TABLE).compress();

    let mut challenge = [0u8; 64];
    sha512_into(&mut challenge, &[&big_r.as_bytes()[..], &public_key[..32], message]);
    let k = Scalar::from_bytes_mod_order_wide(&challenge);

    scratch[SCALAR].copy_from_slice(&private_key[..32]);
    let a = scalar_mod_order(&scratch[SCALAR]);
    let s = Zeroizing::new(k * *a + *r);

    out_signature[..32].copy_from_slice(big_r.as_bytes());
    out_signature[32..64].copy_from_slice(s.as_bytes());
}

/// Verify \[s\]B = R + \[k\]A
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    // The top three bits of S are never set in a reduced scalar
    if signature[63] & 224 != 0 {
        return false;
    }

    let Some(a_point) = decompress(public_key) else {
        return false;
    };
    let Some(s) = Option::<Scalar>::from(Scalar::from_canonical_bytes(array32(&signature[32..64])))
    else {
        return false;
    };

    let mut challenge = [0u8; 64];
    sha512_into(&mut challenge, &[&signature[..32], &public_key[..32], message]);
    let k = Scalar::from_bytes_mod_order_wide(&challenge);

    // R' = [s]B - [k]A
    let check = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &(-a_point), &s);
    ct_eq(check.compress().as_bytes(), &signature[..32])
}

/// Add a blinding scalar to either or both halves of a key pair
///
/// The scalar's top bit is cleared before use. The public key becomes
/// A + \[n\]B, the private scalar becomes (a + n) mod L and the nonce prefix
/// is re-derived as SHA-512(prefix || scalar)\[..32\]. Returns `false`
/// without modifying anything if the public key is not a curve point.
pub fn add_scalar(
    public_key: Option<&mut [u8]>,
    private_key: Option<&mut [u8]>,
    scalar: &[u8],
    scratch: &mut [u8],
) -> bool {
    scratch[SCALAR].copy_from_slice(&scalar[..32]);
    scratch[SCALAR.end - 1] &= 127;
    let n = scalar_mod_order(&scratch[SCALAR]);

    let blinded = match public_key.as_deref() {
        Some(bytes) => match decompress(bytes) {
            Some(a_point) => Some((a_point + &*n * ED25519_BASEPOINT_TABLE).compress()),
            None => return false,
        },
        None => None,
    };

    if let Some(private_key) = private_key {
        let a = scalar_mod_order(&private_key[..32]);
        let blinded_scalar = Zeroizing::new(*a + *n);
        private_key[..32].copy_from_slice(blinded_scalar.as_bytes());

        sha512_into(&mut scratch[HASH], &[&private_key[32..64], &scalar[..32]]);
        private_key[32..64].copy_from_slice(&scratch[HASH][..32]);
    }

    if let (Some(public_key), Some(blinded)) = (public_key, blinded) {
        public_key[..32].copy_from_slice(blinded.as_bytes());
    }
    true
}

/// X25519 over the Montgomery form of an Ed25519 public key
///
/// Returns `false` without writing if the public key is not a curve point.
pub fn key_exchange(
    out_shared_secret: &mut [u8],
    public_key: &[u8],
    private_key: &[u8],
    scratch: &mut [u8],
) -> bool {
    let Some(a_point) = decompress(public_key) else {
        return false;
    };

    scratch[SCALAR].copy_from_slice(&private_key[..32]);
    clamp(&mut scratch[SCALAR]);
    let e = Zeroizing::new(array32(&scratch[SCALAR]));

    let shared = a_point.to_montgomery().mul_clamped(*e);
    out_shared_secret[..32].copy_from_slice(shared.as_bytes());
    true
}

/// SHA-512 digest of `message`
pub fn sha512(out_digest: &mut [u8], message: &[u8]) {
    sha512_into(out_digest, &[message]);
}
