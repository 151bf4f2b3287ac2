//! Charref Reference Tables
//!
//! Named character reference data for XML, HTML 4.01 and HTML5, and the
//! legacy numeric remapping used when decoding `&#128;`-style references.

mod data;
mod error;
mod level;
mod numeric;
mod references;

pub use error::ParseLevelError;
pub use level::Level;
pub use numeric::{legacy_numeric, MAX_CODEPOINT, REPLACEMENT_CHARACTER};
pub use references::{named_references, NamedReferences};
