//! Identity module: Natural keys and deduplication
//!
//! Every raw record is resolved through an [`IdentityIndex`] before it
//! touches the model, so one real-world entity maps to exactly one entity
//! however many batches report it. Repeated observations are folded in with
//! [`Merge`], which never lets a blank value erase a populated one.

mod index;
mod key;
mod merge;

pub use index::{IdentityIndex, Resolution};
pub use key::NaturalKey;
pub use merge::{merge_text, merge_value, non_blank, Merge};

#[cfg(test)]
mod tests;
