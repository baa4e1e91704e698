use std::rc::Rc;

use macroquad::prelude::*;

use crate::draw::{brighter, darker, draw_centered_text, draw_rounded_rect};
use crate::look_and_feel::{KnobLookAndFeel, ROTARY_END, ROTARY_START};
use crate::pedal::PedalType;

pub const PEDAL_WIDTH: f32 = 265.0;
pub const PEDAL_HEIGHT: f32 = 475.0;

const KNOB_MAX: f32 = 10.0;
const KNOB_SIZE: f32 = 100.0;
const KNOB_X: f32 = (PEDAL_WIDTH - KNOB_SIZE) * 0.5;
const TOP_KNOB_Y: f32 = 45.0;
const BOTTOM_KNOB_Y: f32 = 200.0;
const DRAG_SENSITIVITY: f32 = 0.005;
const WHEEL_SENSITIVITY: f32 = 0.03;
const CORNER_RADIUS: f32 = 12.0;

/// Rotary control with a value in `0..=KNOB_MAX`.
#[derive(Clone, Debug)]
pub struct RotaryKnob {
    label: String,
    value: f32,
    offset: Rect,
}

impl RotaryKnob {
    fn new(label: &str, y: f32) -> Self {
        Self {
            label: label.to_string(),
            value: 0.0,
            offset: Rect::new(KNOB_X, y, KNOB_SIZE, KNOB_SIZE),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn proportional(&self) -> f32 {
        self.value / KNOB_MAX
    }

    pub fn set_proportional(&mut self, proportional: f32) {
        self.value = proportional.clamp(0.0, 1.0) * KNOB_MAX;
    }

    /// Vertical drag relative to where it started; up increases.
    pub fn drag_from(&mut self, origin_proportional: f32, origin_y: f32, y: f32) {
        self.set_proportional(origin_proportional + (origin_y - y) * DRAG_SENSITIVITY);
    }

    pub fn nudge(&mut self, wheel: f32) {
        self.set_proportional(self.proportional() + wheel * WHEEL_SENSITIVITY);
    }
}

/// One effect pedal on the board.
pub struct PedalPanel {
    name: String,
    short_name: String,
    colour: Color,
    bounds: Rect,
    knobs: [RotaryKnob; 2],
    look_and_feel: Rc<KnobLookAndFeel>,
}

impl PedalPanel {
    pub fn new(
        name: &str,
        short_name: &str,
        colour: Color,
        knob_labels: (&str, &str),
        look_and_feel: Rc<KnobLookAndFeel>,
    ) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name.to_string(),
            colour,
            bounds: Rect::new(0.0, 0.0, PEDAL_WIDTH, PEDAL_HEIGHT),
            knobs: [
                RotaryKnob::new(knob_labels.0, TOP_KNOB_Y),
                RotaryKnob::new(knob_labels.1, BOTTOM_KNOB_Y),
            ],
            look_and_feel,
        }
    }

    pub fn from_type(pedal: PedalType, look_and_feel: Rc<KnobLookAndFeel>) -> Self {
        Self::new(
            pedal.name(),
            pedal.short_name(),
            pedal.colour(),
            pedal.knob_labels(),
            look_and_feel,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn colour(&self) -> Color {
        self.colour
    }

    pub fn knob_labels(&self) -> (&str, &str) {
        (self.knobs[0].label(), self.knobs[1].label())
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.bounds.x = position.x;
        self.bounds.y = position.y;
    }

    pub fn knob(&self, index: usize) -> Option<&RotaryKnob> {
        self.knobs.get(index)
    }

    pub fn knob_mut(&mut self, index: usize) -> Option<&mut RotaryKnob> {
        self.knobs.get_mut(index)
    }

    /// Knob bounds in the panel's parent space.
    pub fn knob_bounds(&self, index: usize) -> Option<Rect> {
        self.knobs
            .get(index)
            .map(|knob| knob.offset.offset(self.bounds.point()))
    }

    /// Index of the knob under `point`, given in the panel's parent space.
    pub fn knob_at(&self, point: Vec2) -> Option<usize> {
        (0..self.knobs.len()).find(|index| {
            self.knob_bounds(*index)
                .is_some_and(|rect| rect.contains(point))
        })
    }

    pub fn mouse_up(&mut self, point: Vec2) {
        log::trace!("mouse up on {} at {:?}", self.short_name, point);
    }

    /// Paints the panel with its top-left at `origin` on screen.
    pub fn draw(&self, origin: Vec2) {
        let body = Rect::new(origin.x, origin.y, self.bounds.w, self.bounds.h);
        draw_rounded_rect(
            body.offset(vec2(4.0, 6.0)),
            CORNER_RADIUS,
            Color::new(0.0, 0.0, 0.0, 0.45),
        );
        draw_rounded_rect(body, CORNER_RADIUS, darker(self.colour, 0.3));
        draw_rounded_rect(
            Rect::new(body.x + 4.0, body.y + 4.0, body.w - 8.0, body.h - 8.0),
            CORNER_RADIUS - 2.0,
            self.colour,
        );

        for (index, knob) in self.knobs.iter().enumerate() {
            let rect = knob.offset.offset(origin);
            self.look_and_feel.draw_rotary_slider(
                rect,
                knob.proportional(),
                ROTARY_START,
                ROTARY_END,
                brighter(self.colour, 0.4),
            );
            draw_centered_text(
                knob.label(),
                Rect::new(rect.x - 20.0, rect.y + rect.h + 2.0, rect.w + 40.0, 18.0),
                16,
                BLACK,
            );
            if index == 0 {
                draw_line(
                    body.x + 30.0,
                    rect.y + rect.h + 30.0,
                    body.x + body.w - 30.0,
                    rect.y + rect.h + 30.0,
                    1.0,
                    darker(self.colour, 0.6),
                );
            }
        }

        let plate = Rect::new(body.x + 24.0, body.y + 325.0, body.w - 48.0, 64.0);
        draw_rounded_rect(plate, 6.0, Color::new(0.08, 0.08, 0.08, 1.0));
        draw_centered_text(
            &self.short_name,
            Rect::new(plate.x, plate.y + 4.0, plate.w, 36.0),
            40,
            self.colour,
        );
        draw_centered_text(
            &self.name,
            Rect::new(plate.x, plate.y + 40.0, plate.w, 20.0),
            16,
            Color::new(0.85, 0.85, 0.85, 1.0),
        );

        let switch = Rect::new(body.x + 70.0, body.y + 405.0, body.w - 140.0, 50.0);
        draw_rounded_rect(switch, 8.0, Color::new(0.55, 0.56, 0.58, 1.0));
        draw_rounded_rect(
            Rect::new(switch.x + 4.0, switch.y + 4.0, switch.w - 8.0, switch.h - 8.0),
            6.0,
            Color::new(0.7, 0.71, 0.73, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phaser() -> PedalPanel {
        PedalPanel::from_type(PedalType::Phaser, KnobLookAndFeel::shared())
    }

    #[test]
    fn copies_table_attributes() {
        let panel = phaser();
        assert_eq!(panel.name(), "Phaser");
        assert_eq!(panel.short_name(), "PH-1");
        assert_eq!(panel.knob_labels(), ("RATE", "DEPTH"));
        assert_eq!(panel.colour(), PedalType::Phaser.colour());
        assert_eq!(panel.bounds().size(), vec2(PEDAL_WIDTH, PEDAL_HEIGHT));
    }

    #[test]
    fn knobs_start_at_minimum() {
        let panel = phaser();
        for index in 0..2 {
            assert_eq!(panel.knob(index).map(RotaryKnob::value), Some(0.0));
        }
    }

    #[test]
    fn knobs_stack_vertically_and_follow_position() {
        let mut panel = phaser();
        panel.set_position(vec2(285.0, 25.0));
        let top = panel.knob_bounds(0).unwrap();
        let bottom = panel.knob_bounds(1).unwrap();
        assert_eq!(top.x, bottom.x);
        assert!(top.y + top.h <= bottom.y);
        assert_eq!(top.x, 285.0 + KNOB_X);
        assert_eq!(panel.knob_at(top.center()), Some(0));
        assert_eq!(panel.knob_at(bottom.center()), Some(1));
        assert_eq!(panel.knob_at(vec2(290.0, 30.0)), None);
    }

    #[test]
    fn dragging_up_raises_value() {
        let mut knob = RotaryKnob::new("RATE", 0.0);
        knob.drag_from(0.0, 300.0, 200.0);
        assert!((knob.proportional() - 0.5).abs() < 1e-6);
        assert!((knob.value() - 5.0).abs() < 1e-5);
        knob.drag_from(0.5, 300.0, 0.0);
        assert_eq!(knob.proportional(), 1.0);
        knob.drag_from(0.5, 0.0, 600.0);
        assert_eq!(knob.value(), 0.0);
    }

    #[test]
    fn panels_share_look_and_feel() {
        let first = phaser();
        let second = PedalPanel::from_type(PedalType::Spectrum, KnobLookAndFeel::shared());
        assert!(Rc::ptr_eq(&first.look_and_feel, &second.look_and_feel));
    }
}
