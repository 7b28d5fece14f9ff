//! Quote item resolution.
//!
//! Turns a wizard configuration into priced quote lines: the matching pool row,
//! one row per chosen option, their required surcharges, merged into whatever
//! lines the quote already holds. Implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod configuration;
pub mod error;
pub mod item;
pub mod merge;
pub mod resolver;
pub mod selection;
pub mod surcharge;

pub use configuration::{ContactData, OptionCategory, PoolConfiguration, Selection};
pub use error::ResolveError;
pub use item::{GeneratedQuoteItem, ItemSource};
pub use merge::{MergeOutcome, merge_item, merge_items};
pub use resolver::{
    QuoteRequest, QuoteResolution, QuoteResolver, QuoteSettings, resolve_quote_items,
};
pub use selection::{Criterion, find_option, find_pool};
pub use surcharge::expand_surcharges;
