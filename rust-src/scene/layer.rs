//! Scene root and its named layers.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::element::Element;


/// An ordered group of keyed elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub name: String,
    pub attrs: BTreeMap<String, String>,
    pub(crate) elements: IndexMap<String, Element>,
}


impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.elements.get_mut(key)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}


/// The drawing of one chart: a sized canvas holding ordered layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub class: String,
    layers: IndexMap<String, Layer>,
}


impl Scene {
    pub fn new(width: f64, height: f64, class: &str) -> Self {
        Self {
            width,
            height,
            class: class.to_string(),
            layers: IndexMap::new(),
        }
    }

    /// Append a layer; an existing layer of the same name is kept as is.
    pub fn add_layer(&mut self, layer: Layer) -> &mut Layer {
        self.layers.entry(layer.name.clone()).or_insert(layer)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Layer by name, created empty at the end if missing.
    pub fn layer_mut(&mut self, name: &str) -> &mut Layer {
        self.layers
            .entry(name.to_string())
            .or_insert_with(|| Layer::new(name))
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Find an element in any layer.
    pub fn find(&self, key: &str) -> Option<&Element> {
        self.layers.values().find_map(|layer| layer.get(key))
    }
}
