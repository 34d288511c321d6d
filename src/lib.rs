//! skr - skill router
//!
//! Routes a free-text task description to a small, bounded set of skill
//! descriptor documents, spending at most a fixed number of full descriptor
//! reads per routing call.
//!
//! The pipeline: [`engine::SkillScheduler::load`] builds a metadata-only
//! registry from `SKILL.md` frontmatter, then each
//! [`engine::SkillScheduler::schedule`] call scores every skill cheaply,
//! refines the top candidates with budgeted trigger reads, and falls back
//! through a trigger-only rescan to a fixed default list.

pub mod app;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod hints;
pub mod index;
pub mod text;

pub use error::{Result, SkrError};
