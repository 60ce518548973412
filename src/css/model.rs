//! CSS AST: Selector, RuleSet, Declaration.

/// Pseudo-class naming the shadow host from inside its scoped stylesheet.
pub const HOST_PSEUDO_CLASS: &str = "host";

/// A single CSS selector component.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches widget type or tag name (e.g. `Button`, `my-counter`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Pseudo-class: `:host`, `:focus`, etc.
    PseudoClass(String),
}

/// A combinator between selector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A single compound selector (sequence of components without combinators).
///
/// `Button.primary:focus` is one `CompoundSelector` with three components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }

    /// Whether this compound is exactly `:host`.
    pub fn is_host(&self) -> bool {
        matches!(
            self.components.as_slice(),
            [SelectorComponent::PseudoClass(name)] if name == HOST_PSEUDO_CLASS
        )
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// A compound selector (one or more simple selectors).
    Compound(CompoundSelector),
    /// A combinator between compound selectors.
    Combinator(Combinator),
}

/// A full CSS selector: chain of compound selectors joined by combinators.
///
/// `:host > Button.primary` has parts
/// `[Compound(:host), Combinator(Child), Compound(Button.primary)]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rightmost compound selector, which must match the subject node.
    pub fn subject(&self) -> Option<&CompoundSelector> {
        match self.parts.last()? {
            SelectorPart::Compound(compound) => Some(compound),
            SelectorPart::Combinator(_) => None,
        }
    }
}

/// A value token within a CSS declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    /// An identifier like `white`, `bold`, `initial`.
    Ident(String),
    /// A bare number like `2` or `0.5`. Lengths are in terminal cells.
    Number(f32),
    /// A hex color string (without the `#` prefix), e.g. `"3498db"`.
    Color(String),
    /// A quoted string value.
    String(String),
}

/// A single CSS property declaration, e.g. `color: white` or `padding: 0 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"color"`, `"padding"`.
    pub property: String,
    /// The declaration values.
    pub values: Vec<DeclarationValue>,
    /// Whether `!important` was specified.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: String, values: Vec<DeclarationValue>, important: bool) -> Self {
        Self {
            property,
            values,
            important,
        }
    }
}

/// A CSS rule: one or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The selectors for this rule (comma-separated in CSS).
    pub selectors: Vec<Selector>,
    /// The property declarations inside the `{ ... }` block.
    pub declarations: Vec<Declaration>,
}

/// A parsed CSS stylesheet: a list of rule sets.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub rules: Vec<RuleSet>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(components: Vec<SelectorComponent>) -> CompoundSelector {
        CompoundSelector { components }
    }

    #[test]
    fn host_compound() {
        let host = compound(vec![SelectorComponent::PseudoClass("host".into())]);
        assert!(host.is_host());
    }

    #[test]
    fn host_with_extras_is_not_plain_host() {
        let c = compound(vec![
            SelectorComponent::PseudoClass("host".into()),
            SelectorComponent::Class("dark".into()),
        ]);
        assert!(!c.is_host());
        let focus = compound(vec![SelectorComponent::PseudoClass("focus".into())]);
        assert!(!focus.is_host());
    }

    #[test]
    fn selector_subject_is_rightmost_compound() {
        let selector = Selector {
            parts: vec![
                SelectorPart::Compound(compound(vec![SelectorComponent::PseudoClass(
                    "host".into(),
                )])),
                SelectorPart::Combinator(Combinator::Child),
                SelectorPart::Compound(compound(vec![SelectorComponent::Type("Button".into())])),
            ],
        };
        assert_eq!(
            selector.subject().unwrap().components,
            vec![SelectorComponent::Type("Button".into())]
        );
        assert!(Selector::new().subject().is_none());
    }

    #[test]
    fn declaration_new() {
        let decl = Declaration::new(
            "padding".into(),
            vec![DeclarationValue::Number(0.0), DeclarationValue::Number(2.0)],
            false,
        );
        assert_eq!(decl.property, "padding");
        assert_eq!(decl.values.len(), 2);
        assert!(!decl.important);
    }

    #[test]
    fn stylesheet_default_is_empty() {
        assert!(StyleSheet::default().rules.is_empty());
        assert!(StyleSheet::new().rules.is_empty());
    }
}
