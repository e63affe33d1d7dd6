pub mod assembler;
pub mod comment;
pub mod consolidation;
pub mod grouper;
pub mod normalizer;
pub mod rules;
pub mod selection;

pub use assembler::{Assembly, PayloadAssembler, SkippedItem};
pub use consolidation::{ConsolidationOutcome, ConsolidationService};
pub use grouper::{group_by_order, GroupedItems};
pub use rules::{EmbeddedRules, FileRules, RuleSource};
