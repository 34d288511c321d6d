//! Skill descriptor indexing.
//!
//! Indexing is two-tier by design: `load_registry` reads only a bounded
//! frontmatter prefix of each descriptor (cheap, metadata-only), while
//! trigger phrases are pulled in lazily through [`Registry::load_details`]
//! under the ranking engine's read budget.

mod descriptor;
mod loader;
mod parser;
mod registry;

pub use descriptor::{DetailState, SkillDescriptor};
pub use loader::{
    DESCRIPTOR_FILE_NAME, EmptyIdentifierPolicy, INDEX_READ_CAP, LoadReport, load_registry,
};
pub use parser::{extract_triggers, parse_frontmatter};
pub use registry::Registry;
