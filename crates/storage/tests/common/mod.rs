pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{archive_piece, registry_piece, seeded_bytes};
#[allow(unused_imports)]
pub use mocks::CountingFileStore;
