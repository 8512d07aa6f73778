//! Manifest Assembly
//!
//! Wraps the component tree in product metadata and the install-location
//! directory chain, and serializes the result as a WiX source document.

pub mod assembler;
pub mod document;
pub mod guid;
pub mod location;
pub mod wix;
pub mod xml;

pub use assembler::ManifestAssembler;
pub use document::{ManifestDocument, ProductInfo};
pub use guid::{GuidGenerator, GuidMode, RandomGuids, StableGuids};
pub use location::{DirectoryChain, InstallScope, ProgramsFolder};
