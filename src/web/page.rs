//! [`Page`] over the live DOM.

use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CustomEvent, Document, Element, EventTarget, HtmlElement,
    KeyboardEvent, MouseEvent, NodeList, Window,
};

use crate::error::MotionError;
use crate::host::{
    EventKind, Handler, ListenTarget, Page, PageEvent, Rect, Subscription, Viewport,
};
use crate::util::css::parse_leading_number;

/// The browser document.
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// Page for the global window.
    pub fn from_window() -> Result<Self, MotionError> {
        let window =
            web_sys::window().ok_or(MotionError::UnsupportedEnvironment("no window"))?;
        let document = window
            .document()
            .ok_or(MotionError::UnsupportedEnvironment("no document"))?;
        Ok(Self { window, document })
    }

    /// The global window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn log_js(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::debug!("{what} failed: {e:?}");
    }
}

/// Translate a DOM event into a [`PageEvent`] of the expected kind.
fn translate(kind: EventKind, event: &web_sys::Event, document: &Document) -> Option<PageEvent> {
    Some(match kind {
        EventKind::PointerMove => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            PageEvent::PointerMoved {
                x: mouse.client_x() as f32,
                y: mouse.client_y() as f32,
            }
        }
        EventKind::Resize => PageEvent::Resized,
        EventKind::Scroll => PageEvent::Scrolled,
        EventKind::VisibilityChange => PageEvent::VisibilityChanged {
            hidden: document.hidden(),
        },
        EventKind::KeyDown => PageEvent::KeyDown {
            key: event.dyn_ref::<KeyboardEvent>()?.key(),
        },
        EventKind::Click => PageEvent::Clicked,
        EventKind::AssetProgress => {
            let detail = event.dyn_ref::<CustomEvent>()?.detail();
            let total_progress = js_sys::Reflect::get(&detail, &"totalProgress".into())
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            PageEvent::AssetProgress { total_progress }
        }
        EventKind::AssetLoad => PageEvent::AssetLoaded,
    })
}

impl Page for DomPage {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector))
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn query_all_in(&self, root: &Element, selector: &str) -> Vec<Element> {
        elements(root.query_selector_all(selector))
    }

    fn bounding_rect(&self, node: &Element) -> Option<Rect> {
        // No client rects: detached or `display: none`.
        if !node.is_connected() || node.get_client_rects().length() == 0 {
            return None;
        }
        let r = node.get_bounding_client_rect();
        Some(Rect {
            left: r.left(),
            top: r.top(),
            right: r.right(),
            bottom: r.bottom(),
        })
    }

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport {
            width: dim(self.window.inner_width()),
            height: dim(self.window.inner_height()),
        }
    }

    fn style_token(&self, name: &str) -> Option<f64> {
        let root = self.document.document_element()?;
        let style = self.window.get_computed_style(&root).ok().flatten()?;
        let value = style.get_property_value(name).ok()?;
        parse_leading_number(&value)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|m| m.matches())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            log_js("set style", el.style().set_property(property, value));
        }
    }

    fn set_hidden(&self, node: &Element, hidden: bool) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.set_hidden(hidden);
        }
    }

    fn is_hidden(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlElement>().is_some_and(HtmlElement::hidden)
    }

    fn add_class(&self, node: &Element, class: &str) {
        log_js("add class", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        log_js("remove class", node.class_list().remove_1(class));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        log_js("set attribute", node.set_attribute(name, value));
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn replace_with_units(&self, node: &Element, class: &str, fragments: &[&str]) -> Vec<Element> {
        node.set_text_content(None);
        let batch = self.document.create_document_fragment();
        let mut units = Vec::with_capacity(fragments.len());
        for text in fragments {
            let Ok(span) = self.document.create_element("span") else {
                continue;
            };
            span.set_class_name(class);
            span.set_text_content(Some(text));
            if batch.append_child(&span).is_ok() {
                units.push(span);
            }
        }
        if let Err(e) = node.append_child(&batch) {
            log::debug!("inserting units failed: {e:?}");
        }
        units
    }

    fn listen(
        &self,
        target: &ListenTarget<Element>,
        kind: EventKind,
        mut handler: Handler,
    ) -> Subscription {
        let event_target: EventTarget = match target {
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Node(el) => el.clone().into(),
        };
        let document = self.document.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(page_event) = translate(kind, &event, &document) {
                handler(&page_event);
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(e) = event_target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.dom_name(),
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            log::debug!("listening for {} failed: {e:?}", kind.dom_name());
            return Subscription::inert();
        }

        Subscription::new(move || {
            log_js(
                "remove listener",
                event_target.remove_event_listener_with_callback(
                    kind.dom_name(),
                    closure.as_ref().unchecked_ref(),
                ),
            );
            // The listener may be detaching itself from inside its own call.
            closure.forget();
        })
    }
}
