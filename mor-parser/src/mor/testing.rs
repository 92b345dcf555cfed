//! Testing utilities
//!
//!     Shared fixtures and factories for the unit and integration tests.
//!
//!     MOR files are whitespace sensitive: a space where a tab belongs, or a missing final
//!     newline, changes what is being tested. Hand-typing the same documents in many tests
//!     invites exactly those slips, so tests should:
//!
//!         1. Use the curated sample files via [samples] for whole documents
//!         2. Use the [factories] for tokens and model nodes built in code
//!
//!     Examples:
//!
//!     ```rust,ignore
//!     use crate::mor::testing::samples::Sample;
//!     use crate::mor::testing::factories::{cat, entry};
//!
//!     let dictionary = Sample::Nouns.dictionary();
//!     let built = entry("cat", &[("scat", "n")]).with_sem(Sem::new("animal"));
//!     assert_eq!(dictionary.entries[0], built);
//!     ```

pub mod factories;
pub mod samples;
