//! DOM View
//!
//! [`View`] over the live document. Elements are looked up on every call, so
//! nodes replaced by the page after initialization are still found.

use fastwell::view::View;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// The current page as a [`View`]
#[derive(Clone)]
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The page's document, if running in a browser window
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    /// Whether the root `<html>` element carries `class`
    pub fn root_has_class(&self, class: &str) -> bool {
        self.document
            .document_element()
            .map(|root| root.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_style(&self, selector: &str, property: &str, value: &str) {
        if let Some(element) = self.query(selector).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn input(&self, selector: &str) -> Option<HtmlInputElement> {
        self.query(selector)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    }
}

impl View for DomView {
    fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn data_attribute(&self, selector: &str, key: &str) -> Option<String> {
        self.query(selector)
            .and_then(|e| e.get_attribute(&format!("data-{}", key)))
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(element) = self.query(selector) {
            element.set_text_content(Some(text));
        }
    }

    fn set_width_percent(&self, selector: &str, percent: f64) {
        self.set_style(selector, "width", &format!("{}%", percent));
    }

    fn set_display(&self, selector: &str, visible: bool) {
        self.set_style(selector, "display", if visible { "block" } else { "none" });
    }

    fn set_value(&self, selector: &str, value: &str) {
        if let Some(input) = self.input(selector) {
            input.set_value(value);
        }
    }

    fn is_checked(&self, selector: &str) -> bool {
        self.input(selector).map(|i| i.checked()).unwrap_or(false)
    }

    fn toggle_class(&self, selector: &str, class: &str) {
        if let Some(element) = self.query(selector) {
            let _ = element.class_list().toggle(class);
        }
    }
}
