//! Piece installation for piecemeal.
//!
//! `PieceInstaller` makes sure every archive-backed piece is present in the
//! local archive cache, translates each piece into a `Dependency`, and hands
//! the batch to a `DependencyInstaller` such as `CommandInstaller`.

pub mod command;
pub mod dependency;
pub mod error;
pub mod orchestrator;
pub mod traits;

pub use command::CommandInstaller;
pub use dependency::{AddRequest, Dependency, DependencySource};
pub use error::{InstallError, InstallResult};
pub use orchestrator::PieceInstaller;
pub use traits::DependencyInstaller;
