//! PDF encryption algorithms.
//!
//! This module implements the cryptographic algorithms specified in the PDF specification
//! for key derivation and password validation.
//!
//! PDF Spec: Section 7.6.3 - Standard Security Handler

use md5::{Digest, Md5};
use sha2::{Digest as Sha2Digest, Sha256, Sha384, Sha512};

/// Padding string used in PDF encryption (32 bytes).
///
/// PDF Spec: Algorithm 2, step 1
const PADDING: &[u8; 32] = b"\x28\xBF\x4E\x5E\x4E\x75\x8A\x41\
                              \x64\x00\x4E\x56\xFF\xFA\x01\x08\
                              \x2E\x2E\x00\xB6\xD0\x68\x3E\x80\
                              \x2F\x0C\xA9\xFE\x64\x53\x69\x7A";

/// Compute the encryption key from a password (Algorithm 2).
///
/// PDF Spec: Section 7.6.3.3 - Algorithm 2: Computing an encryption key
///
/// # Arguments
///
/// * `password` - User or owner password (up to 32 bytes)
/// * `owner_key` - 32-byte owner password hash from encryption dictionary
/// * `permissions` - User access permissions (P field)
/// * `file_id` - First element of file identifier array
/// * `revision` - Encryption revision number (R field)
/// * `key_length` - Key length in bytes
/// * `encrypt_metadata` - Whether to encrypt metadata
///
/// # Returns
///
/// The derived encryption key
pub fn compute_encryption_key(
    password: &[u8],
    owner_key: &[u8],
    permissions: i32,
    file_id: &[u8],
    revision: u32,
    key_length: usize,
    encrypt_metadata: bool,
) -> Vec<u8> {
    let mut hasher = Md5::new();

    // Step a: Pad or truncate password to 32 bytes
    let mut padded_password = [0u8; 32];
    let pass_len = password.len().min(32);
    padded_password[..pass_len].copy_from_slice(&password[..pass_len]);
    if pass_len < 32 {
        padded_password[pass_len..].copy_from_slice(&PADDING[..(32 - pass_len)]);
    }

    // Step b: Pass the password to MD5
    hasher.update(padded_password);

    // Step c: Pass the owner password hash
    hasher.update(owner_key);

    // Step d: Pass permissions as 32-bit little-endian
    hasher.update(permissions.to_le_bytes());

    // Step e: Pass the file identifier
    hasher.update(file_id);

    // Step f: For R >= 4, if EncryptMetadata is false, pass 0xFFFFFFFF
    if revision >= 4 && !encrypt_metadata {
        hasher.update([0xFF, 0xFF, 0xFF, 0xFF]);
    }

    // Step g: Finish MD5 hash
    let mut hash = hasher.finalize().to_vec();

    // Step h: For R >= 3, do 50 additional MD5 iterations on first key_length bytes
    if revision >= 3 {
        for _ in 0..50 {
            let mut hasher = Md5::new();
            hasher.update(&hash[..key_length]);
            hash = hasher.finalize().to_vec();
        }
    }

    // Step i: Return first key_length bytes
    hash[..key_length].to_vec()
}

/// Pad or truncate a password to 32 bytes using the standard padding.
///
/// PDF Spec: Algorithm 2, step 1
#[allow(dead_code)]
pub fn pad_password(password: &[u8]) -> Vec<u8> {
    let mut padded = Vec::with_capacity(32);
    let pass_len = password.len().min(32);
    padded.extend_from_slice(&password[..pass_len]);
    if pass_len < 32 {
        padded.extend_from_slice(&PADDING[..(32 - pass_len)]);
    }
    padded
}

/// Authenticate the user password (Algorithm 4/5).
///
/// PDF Spec: Section 7.6.3.4 - Algorithm 4/5: User password authentication
///
/// Returns the encryption key if authentication succeeds.
pub fn authenticate_user_password(
    password: &[u8],
    user_key: &[u8],
    owner_key: &[u8],
    permissions: i32,
    file_id: &[u8],
    revision: u32,
    key_length: usize,
    encrypt_metadata: bool,
) -> Option<Vec<u8>> {
    // Compute encryption key from password
    let key = compute_encryption_key(
        password,
        owner_key,
        permissions,
        file_id,
        revision,
        key_length,
        encrypt_metadata,
    );

    // Compute expected user key
    let expected_user_key = if revision >= 3 {
        compute_user_key_r3(&key, file_id)
    } else {
        compute_user_key_r2(&key)
    };

    // Compare first 16 bytes (constant-time comparison)
    let matches = constant_time_compare(&user_key[..16], &expected_user_key[..16]);

    if matches { Some(key) } else { None }
}

/// Compute the user password hash for R=2 (Algorithm 4).
///
/// PDF Spec: Section 7.6.3.4 - Algorithm 4
fn compute_user_key_r2(key: &[u8]) -> Vec<u8> {
    // Encrypt padding string with key
    super::rc4::rc4_crypt(key, PADDING)
}

/// Compute the user password hash for R>=3 (Algorithm 5).
///
/// PDF Spec: Section 7.6.3.4 - Algorithm 5
fn compute_user_key_r3(key: &[u8], file_id: &[u8]) -> Vec<u8> {
    // Step a: Create MD5 hash of padding + file ID
    let mut hasher = Md5::new();
    hasher.update(PADDING);
    hasher.update(file_id);
    let mut hash = hasher.finalize().to_vec();

    // Step b: Encrypt the hash 20 times with modified keys
    for i in 0..20 {
        let mut modified_key = key.to_vec();
        for byte in &mut modified_key {
            *byte ^= i as u8;
        }
        hash = super::rc4::rc4_crypt(&modified_key, &hash);
    }

    // Step c: Append 16 arbitrary bytes (we use zeros)
    hash.extend_from_slice(&[0u8; 16]);
    hash
}

/// Constant-time comparison to prevent timing attacks.
///
/// Returns true if the slices are equal.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

/// Compute the "hardened hash" used by revision 6 (ISO 32000-2 Section 7.6.4.3.4,
/// Algorithm 2.B).
///
/// Starting from an initial SHA-256 digest of `password ‖ extra`, repeatedly hash
/// 64 copies of `password ‖ K ‖ extra` with SHA-256, SHA-384, or SHA-512 selected by
/// `K[-1] % 3`, continuing until at least round 64 and the last output byte is
/// no greater than `round - 32`, with a hard cap at round 256.
fn hardened_hash(password: &[u8], salt: &[u8], extra: &[u8]) -> Vec<u8> {
    let mut k = {
        let mut hasher = Sha256::new();
        hasher.update(password);
        hasher.update(salt);
        hasher.update(extra);
        hasher.finalize().to_vec()
    };

    let mut round = 0u32;
    loop {
        let mut k1 = Vec::with_capacity(64 * (password.len() + k.len() + extra.len()));
        for _ in 0..64 {
            k1.extend_from_slice(password);
            k1.extend_from_slice(&k);
            k1.extend_from_slice(extra);
        }

        let e = aes_cbc_no_iv_encrypt(&k[..16], &k[16..32], &k1);

        let modulus = e[..16].iter().fold(0u32, |acc, &b| acc + b as u32) % 3;
        k = match modulus {
            0 => {
                let mut h = Sha256::new();
                h.update(&e);
                h.finalize().to_vec()
            },
            1 => {
                let mut h = Sha384::new();
                h.update(&e);
                h.finalize().to_vec()
            },
            _ => {
                let mut h = Sha512::new();
                h.update(&e);
                h.finalize().to_vec()
            },
        };

        round += 1;
        if round >= 64 && (*e.last().unwrap_or(&0) as u32) <= round - 32 {
            break;
        }
        if round >= 256 {
            break;
        }
    }

    k.truncate(32);
    k
}

/// AES-128-CBC encrypt with no padding, using the first 16 bytes of `key` as the
/// IV source is not applicable here: `iv` is passed explicitly. Used only by the
/// revision-6 hardened hash, which needs raw CBC output, not PKCS#7-padded output.
fn aes_cbc_no_iv_encrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8> {
    super::aes::aes128_cbc_noresize(key, iv, data)
}

/// Compute the SHA-256 (R5) or hardened (R6) hash for password validation or the
/// intermediate key, per ISO 32000-2 Section 7.6.4.3.
fn compute_hash_v5(password: &[u8], salt: &[u8], extra: &[u8], revision: u32) -> Vec<u8> {
    if revision >= 6 {
        hardened_hash(password, salt, extra)
    } else {
        let mut hasher = Sha256::new();
        hasher.update(password);
        hasher.update(salt);
        hasher.update(extra);
        hasher.finalize().to_vec()
    }
}

/// Authenticate a password against the V=5 (R5/R6) `/U` or `/O` entry and recover
/// the file encryption key by unwrapping `/UE` or `/OE`.
///
/// `user_entry` is the 48-byte `/U` value when validating a user password, or the
/// 48-byte `/O` value when validating an owner password; `extra` is empty for the
/// user password and the full 48-byte `/U` string for the owner password (per the
/// spec's Algorithm 2.A/2.B key-salt construction).
pub fn authenticate_password_v5(
    password: &[u8],
    validation_salt: &[u8],
    key_salt: &[u8],
    stored_hash: &[u8],
    wrapped_key: &[u8],
    extra: &[u8],
    revision: u32,
) -> Option<Vec<u8>> {
    let validation_hash = compute_hash_v5(password, validation_salt, extra, revision);
    if !constant_time_compare(&validation_hash, stored_hash) {
        return None;
    }

    let intermediate_key = compute_hash_v5(password, key_salt, extra, revision);
    let file_key = super::aes::aes256_cbc_no_padding_decrypt(
        &intermediate_key,
        &[0u8; 16],
        wrapped_key,
    )
    .ok()?;
    Some(file_key)
}

/// Split a 48-byte `/U` or `/O` entry into `(hash[0..32], validation_salt[32..40],
/// key_salt[40..48])` per ISO 32000-2 Section 7.6.4.3.
pub fn split_v5_entry(entry: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    if entry.len() < 48 {
        return None;
    }
    Some((&entry[0..32], &entry[32..40], &entry[40..48]))
}

/// Build the `/U` and `/UE` entries for a new V=5 encryption dictionary given the
/// user password and a fresh file encryption key. Returns `(U, UE)`.
pub fn compute_user_entry_v5(password: &[u8], file_key: &[u8], revision: u32) -> (Vec<u8>, Vec<u8>) {
    let validation_salt = random_salt();
    let key_salt = random_salt();

    let mut u = compute_hash_v5(password, &validation_salt, &[], revision);
    u.extend_from_slice(&validation_salt);
    u.extend_from_slice(&key_salt);

    let intermediate_key = compute_hash_v5(password, &key_salt, &[], revision);
    let ue = super::aes::aes256_cbc_no_padding_encrypt(&intermediate_key, &[0u8; 16], file_key);

    (u, ue)
}

/// Build the `/O` and `/OE` entries for a new V=5 encryption dictionary given the
/// owner password, the already-computed `/U` entry, and the file encryption key.
/// Returns `(O, OE)`.
pub fn compute_owner_entry_v5(
    password: &[u8],
    u_entry: &[u8],
    file_key: &[u8],
    revision: u32,
) -> (Vec<u8>, Vec<u8>) {
    let validation_salt = random_salt();
    let key_salt = random_salt();

    let mut o = compute_hash_v5(password, &validation_salt, u_entry, revision);
    o.extend_from_slice(&validation_salt);
    o.extend_from_slice(&key_salt);

    let intermediate_key = compute_hash_v5(password, &key_salt, u_entry, revision);
    let oe = super::aes::aes256_cbc_no_padding_encrypt(&intermediate_key, &[0u8; 16], file_key);

    (o, oe)
}

fn random_salt() -> [u8; 8] {
    let mut salt = [0u8; 8];
    let uuid = uuid::Uuid::new_v4();
    salt.copy_from_slice(&uuid.as_bytes()[..8]);
    salt
}
