use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::camera::Viewport;
use crate::error::{MenuError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| MenuError::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| MenuError::MissingElement("document".into()))
}

pub fn query(document: &Document, selector: &str) -> Result<HtmlElement> {
    document
        .query_selector(selector)?
        .ok_or_else(|| MenuError::MissingElement(selector.into()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| MenuError::MissingElement(selector.into()))
}

/// All matches of `selector` below `parent`, in document order.
pub fn query_all(parent: &Element, selector: &str) -> Result<Vec<HtmlElement>> {
    let nodes = parent.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

pub fn data_attribute(element: &Element, key: &str) -> Option<String> {
    element.get_attribute(&format!("data-{key}"))
}

pub fn viewport(window: &Window) -> Result<Viewport> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(w.max(1.0) as f32, h.max(1.0) as f32))
}

pub fn set_opacity(links: &[HtmlElement], opacity: f32) -> Result<()> {
    let value = opacity.to_string();
    for link in links {
        link.style().set_property("opacity", &value)?;
    }
    Ok(())
}

pub fn clear_opacity(links: &[HtmlElement]) {
    for link in links {
        let _ = link.style().remove_property("opacity");
    }
}
