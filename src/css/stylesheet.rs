//! Compiled stylesheets: scoped selector matching and cascade resolution.
//!
//! A [`CompiledStylesheet`] belongs to one scope, either the document or a single
//! shadow root, described by a [`MatchContext`]. Selectors only ever match nodes
//! of their own scope; a shadow root's stylesheet additionally reaches its host
//! through `:host`.

use crate::css::model::{
    Combinator, CompoundSelector, Declaration, Selector, SelectorComponent, SelectorPart,
    StyleSheet, HOST_PSEUDO_CLASS,
};
use crate::css::properties::apply_declaration;
use crate::css::specificity::Specificity;
use crate::css::styles::Styles;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// The scope a stylesheet is matched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchContext {
    /// The shadow host for a scoped stylesheet, `None` for the document.
    pub host: Option<NodeId>,
}

impl MatchContext {
    /// Context for document-level rules.
    pub fn document() -> Self {
        Self { host: None }
    }

    /// Context for the stylesheet of `host`'s shadow root.
    pub fn shadow(host: NodeId) -> Self {
        Self { host: Some(host) }
    }

    /// Whether `node` can be a subject of this scope's selectors.
    fn contains(&self, node: NodeId, dom: &Dom) -> bool {
        if self.host == Some(node) {
            return true;
        }
        !dom.is_shadow_root(node) && dom.scope_host(node) == self.host
    }

    /// Parent of `node` for combinator walks: shadow roots are skipped, the host
    /// is reachable from its shadow tree, and nothing above the host is.
    fn parent(&self, node: NodeId, dom: &Dom) -> Option<NodeId> {
        if self.host == Some(node) {
            return None;
        }
        let parent = dom.parent(node)?;
        if dom.is_shadow_root(parent) {
            return dom.shadow_host(parent).filter(|h| self.host == Some(*h));
        }
        Some(parent)
    }
}

/// A compiled stylesheet ready for matching against DOM nodes.
#[derive(Debug, Default)]
pub struct CompiledStylesheet {
    /// Rules with pre-computed specificity, in source order.
    rules: Vec<CompiledRule>,
}

/// One selector of a rule with its specificity and the declarations it carries.
#[derive(Debug)]
struct CompiledRule {
    selector: Selector,
    specificity: Specificity,
    declarations: Vec<Declaration>,
}

impl CompiledStylesheet {
    /// Compile a parsed [`StyleSheet`].
    ///
    /// Each selector of each rule is compiled separately; `!important`
    /// declarations are split into their own higher-priority rule. If
    /// `is_default` is true, this is a scoped stylesheet that loses to document
    /// rules on the host.
    pub fn compile(stylesheet: &StyleSheet, is_default: bool) -> Self {
        let mut rules = Vec::new();

        for (i, rule) in stylesheet.rules.iter().enumerate() {
            let (important, normal): (Vec<Declaration>, Vec<Declaration>) = rule
                .declarations
                .iter()
                .cloned()
                .partition(|d| d.important);

            for selector in &rule.selectors {
                for (declarations, is_important) in [(&normal, false), (&important, true)] {
                    if declarations.is_empty() {
                        continue;
                    }
                    rules.push(CompiledRule {
                        selector: selector.clone(),
                        specificity: Specificity::from_selector(
                            selector,
                            i as u32,
                            is_default,
                            is_important,
                        ),
                        declarations: declarations.clone(),
                    });
                }
            }
        }

        CompiledStylesheet { rules }
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules were compiled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The matching declarations for `node_id`, each with its specificity.
    pub fn matching<'a>(
        &'a self,
        node_id: NodeId,
        dom: &Dom,
        ctx: MatchContext,
    ) -> Vec<(Specificity, &'a [Declaration])> {
        self.rules
            .iter()
            .filter(|rule| matches_selector(&rule.selector, node_id, dom, ctx))
            .map(|rule| (rule.specificity, rule.declarations.as_slice()))
            .collect()
    }

    /// Compute styles for a single node by matching all rules against it.
    pub fn compute_styles(&self, node_id: NodeId, dom: &Dom, ctx: MatchContext) -> Styles {
        cascade(self.matching(node_id, dom, ctx))
    }
}

/// Merge matched declarations in ascending specificity order.
///
/// Invalid declarations are skipped.
pub fn cascade(mut matches: Vec<(Specificity, &[Declaration])>) -> Styles {
    matches.sort_by_key(|(specificity, _)| *specificity);

    let mut result = Styles::new();
    for (_, declarations) in matches {
        let mut rule_styles = Styles::new();
        for decl in declarations {
            if let Err(err) = apply_declaration(&mut rule_styles, &decl.property, &decl.values) {
                tracing::trace!(property = %decl.property, %err, "skipping declaration");
            }
        }
        result = result.merge(&rule_styles);
    }
    result
}

/// Check whether a full selector matches a given node in `ctx`.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom, ctx: MatchContext) -> bool {
    if !ctx.contains(node_id, dom) {
        return false;
    }
    match selector.parts.split_last() {
        Some((SelectorPart::Compound(subject), rest)) => {
            matches_compound(subject, node_id, dom, ctx) && matches_rest(rest, node_id, dom, ctx)
        }
        _ => false,
    }
}

/// Match the remaining `[.., Compound, Combinator]` prefix leftward from `node_id`,
/// backtracking over descendant candidates.
fn matches_rest(parts: &[SelectorPart], node_id: NodeId, dom: &Dom, ctx: MatchContext) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    let SelectorPart::Combinator(combinator) = last else {
        return false;
    };
    let Some((SelectorPart::Compound(compound), rest)) = rest.split_last() else {
        return false;
    };

    let mut candidate = ctx.parent(node_id, dom);
    while let Some(ancestor) = candidate {
        if matches_compound(compound, ancestor, dom, ctx) && matches_rest(rest, ancestor, dom, ctx) {
            return true;
        }
        if *combinator == Combinator::Child {
            return false;
        }
        candidate = ctx.parent(ancestor, dom);
    }
    false
}

/// Check whether a compound selector matches a single node.
///
/// The host only matches compounds containing `:host`; `:host` only matches the host.
fn matches_compound(compound: &CompoundSelector, node_id: NodeId, dom: &Dom, ctx: MatchContext) -> bool {
    let Some(node) = dom.get(node_id) else {
        return false;
    };
    let is_host = ctx.host == Some(node_id);
    let names_host = compound
        .components
        .iter()
        .any(|c| matches!(c, SelectorComponent::PseudoClass(name) if name == HOST_PSEUDO_CLASS));
    if is_host != names_host {
        return false;
    }
    compound
        .components
        .iter()
        .all(|component| matches_component(component, node, is_host))
}

fn matches_component(component: &SelectorComponent, node: &NodeData, is_host: bool) -> bool {
    match component {
        SelectorComponent::Type(name) => node.widget_type == *name,
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::PseudoClass(name) => name == HOST_PSEUDO_CLASS && is_host,
    }
}
