//! 6-tuple CSS specificity calculation and comparison.
//!
//! ```text
//! (is_user, important, id_count, class_count, type_count, source_order)
//! ```
//!
//! Fields are ordered so that `Ord` (lexicographic) gives the cascade order:
//! - Document rules beat a shadow root's `:host` rules (`is_user`: 1 > 0)
//! - `!important` beats normal
//! - More IDs beat fewer IDs
//! - More classes/pseudo-classes beat fewer
//! - More type selectors beat fewer
//! - Later source order wins as tie-breaker

use crate::css::model::{Selector, SelectorComponent, SelectorPart};

/// CSS specificity as a 6-tuple, ordered from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// 1 for document rules, 0 for scoped (shadow root) rules.
    pub is_user: u8,
    /// 1 if `!important`, 0 otherwise.
    pub important: u8,
    /// Number of ID selectors (`#id`).
    pub id_count: u16,
    /// Number of class + pseudo-class selectors (`.class`, `:host`).
    pub class_count: u16,
    /// Number of type selectors (`Button`, `my-counter`).
    pub type_count: u16,
    /// Source order (later rules have higher values).
    pub source_order: u32,
}

impl Specificity {
    /// Create a zero specificity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute specificity from a parsed selector.
    ///
    /// - `source_order`: the rule's index in the stylesheet (later = higher).
    /// - `is_default`: `true` for scoped rules, `false` for document rules.
    /// - `important`: `true` for the rule's `!important` declarations.
    pub fn from_selector(
        selector: &Selector,
        source_order: u32,
        is_default: bool,
        important: bool,
    ) -> Self {
        let mut spec = Self {
            is_user: u8::from(!is_default),
            important: u8::from(important),
            source_order,
            ..Self::default()
        };

        let components = selector
            .parts
            .iter()
            .filter_map(|part| match part {
                SelectorPart::Compound(compound) => Some(compound),
                SelectorPart::Combinator(_) => None,
            })
            .flat_map(|compound| &compound.components);
        for component in components {
            match component {
                SelectorComponent::Id(_) => spec.id_count += 1,
                SelectorComponent::Class(_) | SelectorComponent::PseudoClass(_) => {
                    spec.class_count += 1
                }
                SelectorComponent::Type(_) => spec.type_count += 1,
                SelectorComponent::Universal => {}
            }
        }

        spec
    }

    /// Returns `true` if this specificity came from a scoped stylesheet.
    pub fn is_default(&self) -> bool {
        self.is_user == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_css;

    fn spec(selector: &str, is_default: bool, important: bool) -> Specificity {
        let sheet = parse_css(&format!("{selector} {{ color: red; }}")).unwrap();
        Specificity::from_selector(&sheet.rules[0].selectors[0], 0, is_default, important)
    }

    #[test]
    fn new_is_zero() {
        let s = Specificity::new();
        assert_eq!(s, Specificity::default());
        assert!(s.is_default());
    }

    #[test]
    fn counts_components() {
        let s = spec("Button.primary:focus #count", false, false);
        assert_eq!(s.id_count, 1);
        assert_eq!(s.class_count, 2);
        assert_eq!(s.type_count, 1);
        assert_eq!(s.is_user, 1);
    }

    #[test]
    fn universal_has_zero_specificity() {
        let s = spec("*", false, false);
        assert_eq!((s.id_count, s.class_count, s.type_count), (0, 0, 0));
    }

    #[test]
    fn host_counts_as_pseudo_class() {
        assert_eq!(spec(":host", true, false).class_count, 1);
    }

    #[test]
    fn document_rule_beats_host_rule() {
        let document = spec("my-counter", false, false);
        let host = spec(":host", true, false);
        assert!(document > host);
    }

    #[test]
    fn important_beats_ids() {
        assert!(spec("Static", false, true) > spec("#count", false, false));
    }

    #[test]
    fn id_beats_class_beats_type() {
        assert!(spec("#a", false, false) > spec(".a.b.c", false, false));
        assert!(spec(".a", false, false) > spec("Button Static", false, false));
    }

    #[test]
    fn source_order_breaks_ties() {
        let sheet = parse_css("Static { color: red; }").unwrap();
        let selector = &sheet.rules[0].selectors[0];
        let early = Specificity::from_selector(selector, 1, false, false);
        let late = Specificity::from_selector(selector, 2, false, false);
        assert!(late > early);
    }
}
