use bytes::Bytes;
use piecemeal_core::{ArchiveId, ExactVersion, PieceName, PiecePackage};

#[allow(dead_code)]
pub fn registry_piece(name: &str, version: &str) -> PiecePackage {
    PiecePackage::registry(
        PieceName::new(name).unwrap(),
        ExactVersion::new(version).unwrap(),
    )
}

#[allow(dead_code)]
pub fn archive_piece(name: &str, version: &str, archive_id: &str) -> PiecePackage {
    PiecePackage::archive(
        PieceName::new(name).unwrap(),
        ExactVersion::new(version).unwrap(),
        ArchiveId::new(archive_id).unwrap(),
    )
}

/// Archive payload of `len` bytes derived from `seed`; distinct seeds give
/// distinct payloads, so a misplaced write shows up as a content mismatch.
#[allow(dead_code)]
pub fn seeded_bytes(seed: u64, len: usize) -> Bytes {
    let mut state = seed ^ 0x9e37_79b9_7f4a_7c15;
    let mut data = Vec::with_capacity(len + 8);
    while data.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.extend_from_slice(&state.to_be_bytes());
    }
    data.truncate(len);
    Bytes::from(data)
}
