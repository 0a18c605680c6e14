//! Keyed reconciliation of a layer against a desired element set.
//!
//! Elements whose key already exists are updated in place, new keys are
//! created, and keys no longer desired are removed. The layer ends up in the
//! order of the desired set.

use indexmap::IndexMap;
use tracing::debug;

use super::element::{Animation, Element, Transition};
use super::layer::Layer;


/// Attributes that get an animation when they change during an update.
const ANIMATABLE: [&str; 14] = [
    "fill", "opacity", "fill-opacity", "stroke-opacity", "x", "y", "width", "height",
    "x1", "x2", "y1", "y2", "cx", "cy",
];


/// How changes are animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileOptions {
    /// Timing for changed attributes of existing elements.
    pub update: Option<Transition>,
    /// Fade applied to removed elements.
    pub exit: Option<Transition>,
}


impl ReconcileOptions {
    pub fn update(transition: Transition) -> Self {
        Self { update: Some(transition), exit: None }
    }

    pub fn exit(mut self, transition: Transition) -> Self {
        self.exit = Some(transition);
        self
    }
}


/// What a reconciliation did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    /// Removed elements, carrying their exit fade if one was requested.
    pub exited: Vec<Element>,
}


impl Patch {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.exited.is_empty()
    }

    pub fn merge(&mut self, other: Patch) {
        self.entered.extend(other.entered);
        self.updated.extend(other.updated);
        self.exited.extend(other.exited);
    }

    pub fn exited_keys(&self) -> Vec<&str> {
        self.exited.iter().map(|el| el.key.as_str()).collect()
    }
}


/// Bring `layer` in line with `desired`.
pub fn reconcile(layer: &mut Layer, desired: Vec<Element>, options: ReconcileOptions) -> Patch {
    let mut patch = Patch::default();
    let mut next: IndexMap<String, Element> = IndexMap::with_capacity(desired.len());

    for mut element in desired {
        let enter = std::mem::take(&mut element.enter);

        match layer.elements.swap_remove(&element.key) {
            None => {
                element.animations = enter;
                patch.entered.push(element.key.clone());
            }
            Some(previous) => {
                let changed = changed_attrs(&previous, &element);
                if !changed.is_empty() || previous.text != element.text {
                    patch.updated.push(element.key.clone());
                }

                element.animations = match options.update {
                    Some(timing) => changed
                        .into_iter()
                        .filter(|attr| ANIMATABLE.contains(&attr.as_str()))
                        .filter_map(|attr| {
                            let from = previous.get_attr(&attr)?.to_string();
                            let to = element.get_attr(&attr)?.to_string();
                            Some(Animation::new(&attr, from, to, timing))
                        })
                        .collect(),
                    None => Vec::new(),
                };
            }
        }

        // Duplicate keys in the desired set: the last one wins
        next.insert(element.key.clone(), element);
    }

    for (_, mut removed) in layer.elements.drain(..) {
        removed.animations.clear();
        if let Some(timing) = options.exit {
            let from = removed.get_attr("opacity").unwrap_or("1").to_string();
            removed.animations.push(Animation::new("opacity", from, "0", timing));
        }
        patch.exited.push(removed);
    }

    layer.elements = next;

    debug!(
        layer = %layer.name,
        entered = patch.entered.len(),
        updated = patch.updated.len(),
        exited = patch.exited.len(),
        "reconciled layer"
    );

    patch
}


fn changed_attrs(previous: &Element, next: &Element) -> Vec<String> {
    let mut changed: Vec<String> = next
        .attrs
        .iter()
        .filter(|(name, value)| previous.attrs.get(*name) != Some(value))
        .map(|(name, _)| name.clone())
        .collect();

    changed.extend(
        previous
            .attrs
            .keys()
            .filter(|name| !next.attrs.contains_key(*name))
            .cloned(),
    );
    changed
}
