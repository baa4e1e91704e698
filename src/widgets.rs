use macroquad::prelude::*;

use crate::draw::{brighter, draw_centered_text, draw_rounded_rect};

const BUTTON_FILL: Color = Color {
    r: 0.16,
    g: 0.2,
    b: 0.22,
    a: 1.0,
};
const BUTTON_OUTLINE: Color = Color {
    r: 0.35,
    g: 0.42,
    b: 0.45,
    a: 1.0,
};
const SCROLLBAR_THICKNESS: f32 = 8.0;
const MIN_THUMB_WIDTH: f32 = 24.0;
const WHEEL_STEP: f32 = 40.0;

/// Pointer state for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerInput {
    pub position: Vec2,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    pub wheel: f32,
    pub escape: bool,
}

impl PointerInput {
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        let (_wheel_x, wheel_y) = mouse_wheel();
        Self {
            position: vec2(x, y),
            pressed: is_mouse_button_pressed(MouseButton::Left),
            down: is_mouse_button_down(MouseButton::Left),
            released: is_mouse_button_released(MouseButton::Left),
            wheel: wheel_y,
            escape: is_key_pressed(KeyCode::Escape),
        }
    }

    pub fn with_wheel(position: Vec2, wheel: f32) -> Self {
        Self {
            position,
            wheel,
            ..Default::default()
        }
    }

    pub fn press(position: Vec2) -> Self {
        Self {
            position,
            pressed: true,
            down: true,
            ..Default::default()
        }
    }

    pub fn drag(position: Vec2) -> Self {
        Self {
            position,
            down: true,
            ..Default::default()
        }
    }

    pub fn release(position: Vec2) -> Self {
        Self {
            position,
            released: true,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    MouseDown,
    Click,
}

pub struct TextButton {
    label: String,
    bounds: Rect,
    trigger: Trigger,
    armed: bool,
}

impl TextButton {
    pub fn new(label: &str, trigger: Trigger) -> Self {
        Self {
            label: label.to_string(),
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            trigger,
            armed: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Returns true on the frame the button fires.
    pub fn update(&mut self, input: &PointerInput) -> bool {
        let inside = self.bounds.contains(input.position);
        if input.pressed && inside {
            self.armed = true;
            if self.trigger == Trigger::MouseDown {
                self.armed = false;
                return true;
            }
        }
        if input.released && self.armed {
            self.armed = false;
            return inside;
        }
        false
    }

    pub fn draw(&self, hovered: bool) {
        let fill = if self.armed || hovered {
            brighter(BUTTON_FILL, 0.15)
        } else {
            BUTTON_FILL
        };
        draw_rounded_rect(self.bounds, 4.0, fill);
        draw_rectangle_lines(
            self.bounds.x,
            self.bounds.y,
            self.bounds.w,
            self.bounds.h,
            1.0,
            BUTTON_OUTLINE,
        );
        draw_centered_text(&self.label, self.bounds, 18, WHITE);
    }
}

/// Scrollable window onto a content area, horizontal scrollbar only.
#[derive(Debug)]
pub struct Viewport {
    bounds: Rect,
    content: Vec2,
    scroll_x: f32,
    thumb_drag: Option<(f32, f32)>,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            content: Vec2::ZERO,
            scroll_x: 0.0,
            thumb_drag: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.clamp_scroll();
    }

    pub fn content_size(&self) -> Vec2 {
        self.content
    }

    pub fn set_content_size(&mut self, size: Vec2) {
        self.content = size;
        self.clamp_scroll();
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content.x - self.bounds.w).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_x += delta;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll());
    }

    pub fn shows_scrollbar(&self) -> bool {
        self.content.x > self.bounds.w
    }

    pub fn scrollbar_track(&self) -> Option<Rect> {
        if !self.shows_scrollbar() {
            return None;
        }
        Some(Rect::new(
            self.bounds.x,
            self.bounds.y + self.bounds.h - SCROLLBAR_THICKNESS,
            self.bounds.w,
            SCROLLBAR_THICKNESS,
        ))
    }

    pub fn scrollbar_thumb(&self) -> Option<Rect> {
        let track = self.scrollbar_track()?;
        let width = (track.w * self.bounds.w / self.content.x).max(MIN_THUMB_WIDTH);
        let travel = track.w - width;
        let max_scroll = self.max_scroll();
        let offset = if max_scroll > 0.0 {
            travel * self.scroll_x / max_scroll
        } else {
            0.0
        };
        Some(Rect::new(track.x + offset, track.y, width, track.h))
    }

    /// Content-space rect to screen space.
    pub fn to_screen(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.bounds.x - self.scroll_x,
            rect.y + self.bounds.y,
            rect.w,
            rect.h,
        )
    }

    /// Screen-space point to content space.
    pub fn to_content(&self, point: Vec2) -> Vec2 {
        vec2(
            point.x - self.bounds.x + self.scroll_x,
            point.y - self.bounds.y,
        )
    }

    /// Scrollbar interaction. Returns true when the input was consumed.
    pub fn handle_scrollbar(&mut self, input: &PointerInput) -> bool {
        if let Some((origin_x, origin_scroll)) = self.thumb_drag {
            if input.down {
                if let (Some(track), Some(thumb)) = (self.scrollbar_track(), self.scrollbar_thumb())
                {
                    let travel = track.w - thumb.w;
                    if travel > 0.0 {
                        let delta = (input.position.x - origin_x) * self.max_scroll() / travel;
                        self.scroll_x = origin_scroll + delta;
                        self.clamp_scroll();
                    }
                }
                return true;
            }
            self.thumb_drag = None;
            return input.released;
        }
        let Some(track) = self.scrollbar_track() else {
            return false;
        };
        if input.pressed && track.contains(input.position) {
            if let Some(thumb) = self.scrollbar_thumb() {
                if !thumb.contains(input.position) {
                    let page = if input.position.x < thumb.x {
                        -self.bounds.w
                    } else {
                        self.bounds.w
                    };
                    self.scroll_by(page);
                }
            }
            self.thumb_drag = Some((input.position.x, self.scroll_x));
            return true;
        }
        false
    }

    /// Wheel over the viewport scrolls horizontally.
    pub fn handle_wheel(&mut self, input: &PointerInput) -> bool {
        if input.wheel.abs() <= f32::EPSILON || !self.bounds.contains(input.position) {
            return false;
        }
        self.scroll_by(-input.wheel.signum() * WHEEL_STEP);
        true
    }

    pub fn draw_scrollbar(&self) {
        if let (Some(track), Some(thumb)) = (self.scrollbar_track(), self.scrollbar_thumb()) {
            draw_rectangle(
                track.x,
                track.y,
                track.w,
                track.h,
                Color::new(1.0, 1.0, 1.0, 0.05),
            );
            draw_rectangle(
                thumb.x,
                thumb.y,
                thumb.w,
                thumb.h,
                Color::new(1.0, 1.0, 1.0, 0.35),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f32) -> Viewport {
        let mut view = Viewport::new();
        view.set_bounds(Rect::new(0.0, 35.0, width, 565.0));
        view
    }

    #[test]
    fn mouse_down_trigger_fires_on_press() {
        let mut button = TextButton::new("+", Trigger::MouseDown);
        button.set_bounds(Rect::new(0.0, 0.0, 50.0, 25.0));
        assert!(button.update(&PointerInput::press(vec2(10.0, 10.0))));
        assert!(!button.update(&PointerInput::release(vec2(10.0, 10.0))));
    }

    #[test]
    fn click_trigger_needs_release_inside() {
        let mut button = TextButton::new("reset", Trigger::Click);
        button.set_bounds(Rect::new(0.0, 0.0, 50.0, 25.0));
        assert!(!button.update(&PointerInput::press(vec2(10.0, 10.0))));
        assert!(button.update(&PointerInput::release(vec2(12.0, 12.0))));

        assert!(!button.update(&PointerInput::press(vec2(10.0, 10.0))));
        assert!(!button.update(&PointerInput::release(vec2(200.0, 12.0))));
    }

    #[test]
    fn no_scrollbar_when_content_fits() {
        let mut view = viewport(800.0);
        view.set_content_size(vec2(550.0, 565.0));
        assert!(!view.shows_scrollbar());
        assert!(view.scrollbar_thumb().is_none());
        view.scroll_by(100.0);
        assert_eq!(view.scroll_x(), 0.0);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut view = viewport(800.0);
        view.set_content_size(vec2(1100.0, 565.0));
        view.scroll_by(1000.0);
        assert_eq!(view.scroll_x(), 300.0);
        view.set_content_size(Vec2::ZERO);
        assert_eq!(view.scroll_x(), 0.0);
    }

    #[test]
    fn wheel_scrolls_horizontally() {
        let mut view = viewport(800.0);
        view.set_content_size(vec2(1100.0, 565.0));
        assert!(view.handle_wheel(&PointerInput::with_wheel(vec2(100.0, 100.0), -1.0)));
        assert_eq!(view.scroll_x(), WHEEL_STEP);
        assert!(!view.handle_wheel(&PointerInput::with_wheel(vec2(100.0, 10.0), -1.0)));
    }

    #[test]
    fn dragging_thumb_scrolls() {
        let mut view = viewport(800.0);
        view.set_content_size(vec2(1600.0, 565.0));
        let thumb = view.scrollbar_thumb().unwrap();
        assert_eq!(thumb.w, 400.0);
        let grab = thumb.center();
        assert!(view.handle_scrollbar(&PointerInput::press(grab)));
        assert!(view.handle_scrollbar(&PointerInput::drag(grab + vec2(200.0, 0.0))));
        assert_eq!(view.scroll_x(), 400.0);
        assert!(view.handle_scrollbar(&PointerInput::release(grab + vec2(200.0, 0.0))));
    }

    #[test]
    fn coordinates_follow_scroll() {
        let mut view = viewport(800.0);
        view.set_content_size(vec2(1600.0, 565.0));
        view.scroll_by(100.0);
        let screen = view.to_screen(Rect::new(110.0, 25.0, 10.0, 10.0));
        assert_eq!(screen.x, 10.0);
        assert_eq!(screen.y, 60.0);
        assert_eq!(view.to_content(vec2(10.0, 60.0)), vec2(110.0, 25.0));
    }
}
