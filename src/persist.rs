//! Checksummed save blob encode/decode.
//!
//! Blob format:
//! - Version magic (8 bytes, little endian)
//! - Payload length (4 bytes, little endian)
//! - Bincode payload: Character + DifficultyState
//! - SHA-256 checksum over magic + length + payload (32 bytes)
//!
//! Where the blob lives is the caller's concern; the core only guarantees
//! that a round-trip preserves every field in value.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::character::Character;
use crate::core::balance::SAVE_VERSION_MAGIC;
use crate::difficulty::DifficultyState;

const HEADER_LEN: usize = 8 + 4;
const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("save blob is truncated")]
    Truncated,
    #[error("save blob has an unknown version magic")]
    BadMagic,
    #[error("save blob checksum mismatch")]
    ChecksumMismatch,
    #[error("save payload codec error: {0}")]
    Codec(#[from] bincode::Error),
}

#[derive(Serialize, Deserialize)]
struct SaveData {
    character: Character,
    difficulty: DifficultyState,
}

/// Serializes character and difficulty state into a checksummed blob.
pub fn save(character: &Character, difficulty: &DifficultyState) -> Result<Vec<u8>, PersistError> {
    let payload = bincode::serialize(&SaveData {
        character: character.clone(),
        difficulty: difficulty.clone(),
    })?;
    let payload_len = payload.len() as u32;

    let mut blob = Vec::with_capacity(HEADER_LEN + payload.len() + CHECKSUM_LEN);
    blob.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    blob.extend_from_slice(&payload_len.to_le_bytes());
    blob.extend_from_slice(&payload);

    let mut hasher = Sha256::new();
    hasher.update(&blob);
    let checksum = hasher.finalize();
    blob.extend_from_slice(&checksum);

    Ok(blob)
}

/// Decodes and verifies a blob produced by [`save`].
pub fn load(blob: &[u8]) -> Result<(Character, DifficultyState), PersistError> {
    if blob.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(PersistError::Truncated);
    }
    let magic = u64::from_le_bytes(blob[0..8].try_into().expect("sliced to 8 bytes"));
    if magic != SAVE_VERSION_MAGIC {
        return Err(PersistError::BadMagic);
    }
    let payload_len =
        u32::from_le_bytes(blob[8..12].try_into().expect("sliced to 4 bytes")) as usize;
    if blob.len() != HEADER_LEN + payload_len + CHECKSUM_LEN {
        return Err(PersistError::Truncated);
    }

    let (body, stored_checksum) = blob.split_at(HEADER_LEN + payload_len);
    let mut hasher = Sha256::new();
    hasher.update(body);
    if hasher.finalize().as_slice() != stored_checksum {
        return Err(PersistError::ChecksumMismatch);
    }

    let data: SaveData = bincode::deserialize(&body[HEADER_LEN..])?;
    Ok((data.character, data.difficulty))
}
