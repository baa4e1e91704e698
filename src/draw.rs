use macroquad::{prelude::*, text::measure_text};

use crate::look_and_feel::point_on_arc;

/// Polyline arc from `start` to `end`, angles clockwise from 12 o'clock.
pub fn draw_arc(
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    steps: usize,
    thickness: f32,
    color: Color,
) {
    let steps = steps.max(1);
    let sweep = end - start;
    let mut prev = point_on_arc(center, radius, start);
    for idx in 1..=steps {
        let angle = start + sweep * (idx as f32 / steps as f32);
        let next = point_on_arc(center, radius, angle);
        draw_line(prev.x, prev.y, next.x, next.y, thickness, color);
        prev = next;
    }
}

pub fn draw_rounded_rect(rect: Rect, radius: f32, color: Color) {
    let radius = radius.min(rect.w * 0.5).min(rect.h * 0.5);
    draw_rectangle(
        rect.x + radius,
        rect.y,
        rect.w - 2.0 * radius,
        rect.h,
        color,
    );
    draw_rectangle(
        rect.x,
        rect.y + radius,
        rect.w,
        rect.h - 2.0 * radius,
        color,
    );
    draw_circle(rect.x + radius, rect.y + radius, radius, color);
    draw_circle(rect.x + rect.w - radius, rect.y + radius, radius, color);
    draw_circle(rect.x + radius, rect.y + rect.h - radius, radius, color);
    draw_circle(
        rect.x + rect.w - radius,
        rect.y + rect.h - radius,
        radius,
        color,
    );
}

/// Top-to-bottom gradient built from horizontal bands.
pub fn draw_vertical_gradient(rect: Rect, top: Color, bottom: Color) {
    let bands = 32;
    let band_height = rect.h / bands as f32;
    for band in 0..bands {
        let t = (band as f32 + 0.5) / bands as f32;
        let color = Color::new(
            top.r + (bottom.r - top.r) * t,
            top.g + (bottom.g - top.g) * t,
            top.b + (bottom.b - top.b) * t,
            top.a + (bottom.a - top.a) * t,
        );
        draw_rectangle(
            rect.x,
            rect.y + band as f32 * band_height,
            rect.w,
            band_height + 1.0,
            color,
        );
    }
}

pub fn draw_centered_text(text: &str, rect: Rect, size: u16, color: Color) {
    let measure = measure_text(text, None, size, 1.0);
    let x = rect.x + rect.w * 0.5 - measure.width * 0.5;
    let y = rect.y + rect.h * 0.5 + measure.height * 0.5;
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size: size,
            color,
            ..Default::default()
        },
    );
}

/// Scales the RGB channels towards white by `amount`, keeping alpha.
pub fn brighter(color: Color, amount: f32) -> Color {
    let ratio = 1.0 / (1.0 + amount.max(0.0));
    Color::new(
        1.0 - (1.0 - color.r) * ratio,
        1.0 - (1.0 - color.g) * ratio,
        1.0 - (1.0 - color.b) * ratio,
        color.a,
    )
}

pub fn darker(color: Color, amount: f32) -> Color {
    let ratio = 1.0 / (1.0 + amount.max(0.0));
    Color::new(color.r * ratio, color.g * ratio, color.b * ratio, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brighter_black_is_dark_grey() {
        let grey = brighter(BLACK, 0.1);
        assert!((grey.r - (1.0 - 1.0 / 1.1)).abs() < 1e-6);
        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.a, 1.0);
    }

    #[test]
    fn darker_keeps_alpha() {
        let dim = darker(Color::new(0.8, 0.4, 0.2, 0.5), 1.0);
        assert!((dim.r - 0.4).abs() < 1e-6);
        assert_eq!(dim.a, 0.5);
    }
}
