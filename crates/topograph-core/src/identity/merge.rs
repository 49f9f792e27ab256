//! Attribute merging that refines but never downgrades

/// Fold a later observation of the same entity into this one
pub trait Merge {
    /// Returns true if any attribute changed
    fn merge(&mut self, incoming: Self) -> bool;
}

/// Trimmed value, or `None` when absent or blank
#[must_use]
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Replace `current` with a non-blank `incoming`; blanks are ignored
pub fn merge_text(current: &mut Option<String>, incoming: Option<String>) -> bool {
    match non_blank(incoming.as_deref()) {
        Some(value) if current.as_deref() != Some(value) => {
            *current = Some(value.to_string());
            true
        }
        _ => false,
    }
}

/// Replace `current` with `incoming` when it is present
pub fn merge_value<T: PartialEq>(current: &mut Option<T>, incoming: Option<T>) -> bool {
    match incoming {
        Some(value) if current.as_ref() != Some(&value) => {
            *current = Some(value);
            true
        }
        _ => false,
    }
}
