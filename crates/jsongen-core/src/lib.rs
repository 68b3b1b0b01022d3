#![deny(unsafe_code)]

//! jsongen core — groups registry entries, assigns effects to items, and
//! exports the results as JSON.
//!
//! The pipeline reads entries from an [`EntrySource`], classifies them with
//! the [`GroupingEngine`], scores items against effects with the
//! [`EffectAssigner`], and writes every artifact through the [`Exporter`].

/// Effect scoring and top-N selection per item.
pub mod assign;
/// Version metadata embedded at build time.
pub mod build_info;
/// Identifiers, intrinsic tags, and item kinds.
pub mod entry;
/// Artifact writing and the export report.
pub mod export;
/// Blacklist filtering, custom groups, fallbacks, and namespace tagging.
pub mod grouping;
/// Prebuilt category index with atomic replacement.
pub mod index;
/// Entry sources and the registry snapshot document.
pub mod source;

pub use assign::{
    Assignment, AssignmentWeights, EffectAssigner, RankedEffects, RngStrength, ScoredEffect,
    StrengthSource,
};
pub use entry::{EffectCategory, Entry, Identifier, IdentifierError, ItemKind, Rarity};
pub use export::{ExportError, ExportReport, Exporter, FailedArtifact};
pub use grouping::{EntryValue, Grouping, GroupingEngine, NamespaceTags, NestedGrouping};
pub use index::{CategoryIndex, SharedIndex};
pub use source::{EntrySource, RegistrySnapshot, SourceError};
