use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::{Rc, Weak};

use macroquad::prelude::*;

use crate::draw::draw_arc;

/// Default rotary sweep, clockwise from 12 o'clock.
pub const ROTARY_START: f32 = PI * 1.2;
pub const ROTARY_END: f32 = PI * 2.8;

const ARC_STEPS: usize = 48;

thread_local! {
    static SHARED: RefCell<Weak<KnobLookAndFeel>> = RefCell::new(Weak::new());
}

/// Paints the rotary knobs on every pedal.
#[derive(Debug)]
pub struct KnobLookAndFeel {
    track: Color,
    body: Color,
    body_rim: Color,
    pointer: Color,
}

impl KnobLookAndFeel {
    fn new() -> Self {
        Self {
            track: Color::new(0.0, 0.0, 0.0, 0.35),
            body: Color::new(0.1, 0.1, 0.1, 1.0),
            body_rim: Color::new(0.22, 0.22, 0.22, 1.0),
            pointer: WHITE,
        }
    }

    /// Hands out the one live instance, creating it if every previous
    /// holder has been dropped.
    pub fn shared() -> Rc<Self> {
        SHARED.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(existing) = slot.upgrade() {
                return existing;
            }
            let fresh = Rc::new(Self::new());
            *slot = Rc::downgrade(&fresh);
            fresh
        })
    }

    pub fn draw_rotary_slider(
        &self,
        bounds: Rect,
        proportional: f32,
        start_angle: f32,
        end_angle: f32,
        accent: Color,
    ) {
        let center = bounds.center();
        let radius = bounds.w.min(bounds.h) * 0.5 - 4.0;
        let angle = pointer_angle(proportional, start_angle, end_angle);
        let line_width = (radius * 0.12).max(2.0);
        let arc_radius = radius - line_width * 0.5;

        draw_arc(
            center,
            arc_radius,
            start_angle,
            end_angle,
            ARC_STEPS,
            line_width,
            self.track,
        );
        if angle > start_angle {
            draw_arc(
                center,
                arc_radius,
                start_angle,
                angle,
                ARC_STEPS,
                line_width,
                accent,
            );
        }

        let body_radius = radius * 0.72;
        draw_circle(center.x, center.y, body_radius + 2.0, self.body_rim);
        draw_circle(center.x, center.y, body_radius, self.body);

        let tip = point_on_arc(center, body_radius * 0.85, angle);
        let base = point_on_arc(center, body_radius * 0.35, angle);
        draw_line(base.x, base.y, tip.x, tip.y, line_width, self.pointer);
    }
}

/// Angle of the pointer for a proportional value, clamped to the sweep.
pub fn pointer_angle(proportional: f32, start_angle: f32, end_angle: f32) -> f32 {
    start_angle + proportional.clamp(0.0, 1.0) * (end_angle - start_angle)
}

/// Point at `angle` radians clockwise from 12 o'clock, in screen space.
pub fn point_on_arc(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + vec2(angle.sin(), -angle.cos()) * radius
}
