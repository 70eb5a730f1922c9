//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer sampling (mouse and touch fold into one pointer)
//! - Polling the mirror-kind selector
//! - Reading settings from the page

use glam::Vec2;

use crate::optics::{MirrorKind, TickInput};

/// Pointer state accumulated from events between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last known position in canvas coordinates
    pub position: Vec2,
    pub held: bool,
}

impl PointerState {
    pub fn on_move(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn on_down(&mut self, position: Vec2) {
        self.position = position;
        self.held = true;
    }

    pub fn on_up(&mut self) {
        self.held = false;
    }

    /// Sample for one tick
    pub fn to_tick_input(&self, mirror_kind: MirrorKind) -> TickInput {
        TickInput {
            pointer: self.position,
            button_held: self.held,
            mirror_kind,
        }
    }
}

/// Map a client-space point into canvas coordinates
///
/// `rect` is the canvas's on-page box (left, top, width, height); the canvas
/// may be scaled by CSS so the logical size is applied separately.
pub fn client_to_canvas(client: Vec2, rect: (f32, f32, f32, f32), canvas_size: Vec2) -> Vec2 {
    let (left, top, width, height) = rect;
    let scale = Vec2::new(
        if width > 0.0 { canvas_size.x / width } else { 1.0 },
        if height > 0.0 { canvas_size.y / height } else { 1.0 },
    );
    (client - Vec2::new(left, top)) * scale
}

#[cfg(target_arch = "wasm32")]
pub mod dom {
    //! DOM polling helpers

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use crate::optics::MirrorKind;

    const KIND_SELECTOR: &str = "input[name='mirror-kind']:checked";
    const SETTINGS_ATTRIBUTE: &str = "data-settings";

    /// Currently checked mirror-kind radio, if the page has one
    pub fn selected_mirror_kind(document: &Document) -> Option<MirrorKind> {
        let input = document
            .query_selector(KIND_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        MirrorKind::from_str(&input.value())
    }

    /// Check the radio matching `kind`
    pub fn select_mirror_kind(document: &Document, kind: MirrorKind) {
        let selector = format!("input[name='mirror-kind'][value='{}']", kind.as_str());
        if let Some(input) = document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(true);
        }
    }

    /// Settings JSON stored on the canvas element
    pub fn canvas_settings(canvas: &HtmlCanvasElement) -> Option<String> {
        canvas.get_attribute(SETTINGS_ATTRIBUTE)
    }

    pub fn set_title(document: &Document, kind: MirrorKind) {
        if let Some(el) = document.get_element_by_id("mirror-title") {
            el.set_text_content(Some(kind.title()));
        }
    }

    /// Client coordinates to canvas coordinates for this canvas
    pub fn to_canvas(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        super::client_to_canvas(
            Vec2::new(client_x as f32, client_y as f32),
            (
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            ),
            Vec2::new(canvas.width() as f32, canvas.height() as f32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_press_release() {
        let mut p = PointerState::default();
        p.on_move(Vec2::new(10.0, 20.0));
        assert!(!p.held);

        p.on_down(Vec2::new(30.0, 40.0));
        let input = p.to_tick_input(MirrorKind::Convex);
        assert!(input.button_held);
        assert_eq!(input.pointer, Vec2::new(30.0, 40.0));
        assert_eq!(input.mirror_kind, MirrorKind::Convex);

        p.on_up();
        assert!(!p.to_tick_input(MirrorKind::Convex).button_held);
        // Position survives release
        assert_eq!(p.position, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_client_to_canvas_scaled() {
        // Canvas displayed at half size, offset by (100, 50)
        let p = client_to_canvas(
            Vec2::new(150.0, 75.0),
            (100.0, 50.0, 550.0, 250.0),
            Vec2::new(1100.0, 500.0),
        );
        assert_eq!(p, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_client_to_canvas_zero_rect() {
        let p = client_to_canvas(Vec2::new(5.0, 6.0), (0.0, 0.0, 0.0, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(p, Vec2::new(5.0, 6.0));
    }
}
