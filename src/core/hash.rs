// src/core/hash.rs
//! Raw-digest hashing for every supported algorithm

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::enums::Algorithm;

/// Hash `input` once with `algorithm`, returning the raw digest bytes
pub fn digest(algorithm: Algorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha256 => Sha256::digest(input).to_vec(),
        Algorithm::Sha512 => Sha512::digest(input).to_vec(),
        Algorithm::Sha1 => Sha1::digest(input).to_vec(),
        Algorithm::Md5 => Md5::digest(input).to_vec(),
        Algorithm::Sha224 => Sha224::digest(input).to_vec(),
        Algorithm::Sha384 => Sha384::digest(input).to_vec(),
    }
}

/// Apply `digest` `rounds` times. Each round hashes the previous round's
/// raw bytes, never a textual encoding of them.
///
/// `rounds == 0` returns the input unchanged; callers validate the count.
pub fn hash_chain(algorithm: Algorithm, input: &[u8], rounds: u32) -> Vec<u8> {
    let mut buffer = input.to_vec();
    for _ in 0..rounds {
        buffer = digest(algorithm, &buffer);
    }
    buffer
}
