// Vue Single File Component (SFC) support
//
// Page components are SFCs. The extractors only need the root-level blocks
// and their byte ranges, so the file is split by hand instead of running an
// HTML grammar over it.

mod helpers;
pub(crate) mod parsing;

pub use parsing::{parse_sfc, BlockKind, SfcBlock, SfcDescriptor};
