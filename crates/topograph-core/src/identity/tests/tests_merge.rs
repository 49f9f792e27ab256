//! Tests for attribute merging helpers

use crate::identity::{merge_text, merge_value, non_blank};

#[test]
fn test_non_blank() {
    assert_eq!(non_blank(Some("  x ")), Some("x"));
    assert_eq!(non_blank(Some("   ")), None);
    assert_eq!(non_blank(None), None);
}

#[test]
fn test_merge_text_blank_never_overwrites() {
    let mut current = Some("core-1".to_string());
    assert!(!merge_text(&mut current, Some(String::new())));
    assert!(!merge_text(&mut current, None));
    assert_eq!(current.as_deref(), Some("core-1"));
}

#[test]
fn test_merge_text_refines() {
    let mut current = None;
    assert!(merge_text(&mut current, Some(" core-1 ".to_string())));
    assert_eq!(current.as_deref(), Some("core-1"));

    assert!(!merge_text(&mut current, Some("core-1".to_string())));
    assert!(merge_text(&mut current, Some("core-2".to_string())));
    assert_eq!(current.as_deref(), Some("core-2"));
}

#[test]
fn test_merge_value() {
    let mut current = Some(1500u32);
    assert!(!merge_value(&mut current, None));
    assert!(!merge_value(&mut current, Some(1500)));
    assert!(merge_value(&mut current, Some(9000)));
    assert_eq!(current, Some(9000));
}
