//! Output formats
//!
//!     - [mordict]: dictionary text, the inverse of dictionary parsing
//!     - [morcomb]: morcomb text, the inverse of annotation parsing
//!     - [yaml]: the structured encoding of annotations
//!     - [plantuml]: activity and state diagrams of rule files
//!
//!     The text writers share an [emitter::Emitter] so that line endings are decided by
//!     looking at what was already written.

pub mod emitter;
pub mod mordict;
pub mod morcomb;
pub mod plantuml;
pub mod yaml;

pub use mordict::{to_mordict_string, write_mordict, MordictSerializer};
pub use morcomb::{to_morcomb_string, MorcombSerializer};
pub use plantuml::{to_activity_diagram, to_digest_diagram};
pub use yaml::{from_yaml, to_yaml};
