use anyhow::{Context, Result};
use macroquad::prelude::*;
use tokio::sync::oneshot;

use crate::draw::{brighter, draw_vertical_gradient};
use crate::error::BoardError;
use crate::look_and_feel::KnobLookAndFeel;
use crate::menu::PopupMenu;
use crate::panel::{PEDAL_HEIGHT, PEDAL_WIDTH, PedalPanel};
use crate::pedal::PedalType;
use crate::widgets::{PointerInput, TextButton, Trigger, Viewport};

pub const PEDAL_MARGIN: f32 = 10.0;
/// Horizontal footprint of one pedal including its margin.
pub const SLOT_WIDTH: f32 = PEDAL_WIDTH + PEDAL_MARGIN;
pub const PEDAL_TOP: f32 = 25.0;

const TOOLBAR_HEIGHT: f32 = 35.0;
const TOOLBAR_INSET: f32 = 5.0;
const BUTTON_WIDTH: f32 = 50.0;

pub const BACKGROUND: Color = Color {
    r: 0x32 as f32 / 255.0,
    g: 0x3E as f32 / 255.0,
    b: 0x44 as f32 / 255.0,
    a: 1.0,
};

struct KnobDrag {
    pedal: usize,
    knob: usize,
    origin_value: f32,
    origin_y: f32,
}

/// Top-level surface: toolbar plus the scrolling strip of pedals.
pub struct PedalBoard {
    bounds: Rect,
    reset_button: TextButton,
    add_button: TextButton,
    viewport: Viewport,
    pedals: Vec<PedalPanel>,
    menu: Option<PopupMenu>,
    pending_choice: Option<oneshot::Receiver<usize>>,
    knob_drag: Option<KnobDrag>,
}

impl PedalBoard {
    pub fn new(bounds: Rect) -> Self {
        let mut board = Self {
            bounds,
            reset_button: TextButton::new("reset", Trigger::Click),
            add_button: TextButton::new("+", Trigger::MouseDown),
            viewport: Viewport::new(),
            pedals: Vec::new(),
            menu: None,
            pending_choice: None,
            knob_drag: None,
        };
        board.resized(bounds);
        board
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn pedals(&self) -> &[PedalPanel] {
        &self.pedals
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn add_button(&self) -> &TextButton {
        &self.add_button
    }

    pub fn reset_button(&self) -> &TextButton {
        &self.reset_button
    }

    pub fn menu(&self) -> Option<&PopupMenu> {
        self.menu.as_ref()
    }

    /// Adds the pedal for menu id `choice`; `0` leaves the board alone.
    pub fn add_pedal(&mut self, choice: usize) -> Result<(), BoardError> {
        let Some(pedal) = PedalType::from_choice(choice)? else {
            return Ok(());
        };

        let mut panel = PedalPanel::from_type(pedal, KnobLookAndFeel::shared());
        panel.set_position(slot_bounds(self.pedals.len() + 1).point());
        self.pedals.push(panel);

        let height = self.viewport.bounds().h;
        self.viewport
            .set_content_size(vec2(SLOT_WIDTH * self.pedals.len() as f32, height));
        log::info!(
            "added {} pedal, {} on the board",
            pedal.name(),
            self.pedals.len()
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        let removed = self.pedals.len();
        self.knob_drag = None;
        self.pedals.clear();
        self.viewport.set_content_size(Vec2::ZERO);
        log::info!("board reset, removed {removed} pedals");
    }

    /// Opens the pedal chooser. The choice is applied by a later `update`.
    pub fn present_add_menu(&mut self) {
        let items = PedalType::ALL
            .iter()
            .map(|pedal| pedal.name().to_string())
            .collect();
        let (menu, choice) = PopupMenu::show_async(items, self.add_button.bounds(), self.bounds);
        // Replacing an open menu drops it, which dismisses it.
        self.menu = Some(menu);
        self.pending_choice = Some(choice);
        log::debug!("pedal menu presented");
    }

    /// Applies a menu selection if one has arrived since the last call.
    pub fn poll_menu(&mut self) -> Result<()> {
        let Some(receiver) = self.pending_choice.as_mut() else {
            return Ok(());
        };
        let choice = match receiver.try_recv() {
            Ok(choice) => choice,
            Err(oneshot::error::TryRecvError::Empty) => return Ok(()),
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending_choice = None;
                return Ok(());
            }
        };
        self.pending_choice = None;
        self.menu = None;
        log::debug!("pedal menu resolved with {choice}");
        self.add_pedal(choice)
            .with_context(|| format!("applying menu choice {choice}"))
    }

    pub fn resized(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let toolbar = Rect::new(
            bounds.x + TOOLBAR_INSET,
            bounds.y + TOOLBAR_INSET,
            bounds.w - TOOLBAR_INSET * 2.0,
            TOOLBAR_HEIGHT - TOOLBAR_INSET * 2.0,
        );
        self.reset_button
            .set_bounds(Rect::new(toolbar.x, toolbar.y, BUTTON_WIDTH, toolbar.h));
        self.add_button.set_bounds(Rect::new(
            toolbar.x + toolbar.w - BUTTON_WIDTH,
            toolbar.y,
            BUTTON_WIDTH,
            toolbar.h,
        ));
        self.viewport.set_bounds(Rect::new(
            bounds.x,
            bounds.y + TOOLBAR_HEIGHT,
            bounds.w,
            (bounds.h - TOOLBAR_HEIGHT).max(0.0),
        ));
    }

    /// Routes one frame of input, then applies any resolved menu choice.
    pub fn update(&mut self, input: &PointerInput) -> Result<()> {
        self.route_input(input);
        self.poll_menu()
    }

    fn route_input(&mut self, input: &PointerInput) {
        if let Some(menu) = self.menu.as_mut() {
            if menu.update(input) {
                return;
            }
        }
        if self.add_button.update(input) {
            self.present_add_menu();
            return;
        }
        if self.reset_button.update(input) {
            self.reset();
            return;
        }
        if self.viewport.handle_scrollbar(input) {
            return;
        }
        self.handle_knobs(input);
    }

    fn handle_knobs(&mut self, input: &PointerInput) {
        let point = self.viewport.to_content(input.position);
        let inside = self.viewport.bounds().contains(input.position);
        let hovered = if inside { self.pedal_at(point) } else { None };

        if input.pressed {
            if let Some(pedal) = hovered {
                if let Some(knob) = self.pedals[pedal].knob_at(point) {
                    let origin_value = self.pedals[pedal]
                        .knob(knob)
                        .map(|k| k.proportional())
                        .unwrap_or(0.0);
                    self.knob_drag = Some(KnobDrag {
                        pedal,
                        knob,
                        origin_value,
                        origin_y: input.position.y,
                    });
                }
            }
        }

        if !input.down {
            self.knob_drag = None;
        }
        if let Some(drag) = &self.knob_drag {
            if let Some(knob) = self
                .pedals
                .get_mut(drag.pedal)
                .and_then(|panel| panel.knob_mut(drag.knob))
            {
                knob.drag_from(drag.origin_value, drag.origin_y, input.position.y);
            }
        }

        if input.released {
            if let Some(pedal) = hovered {
                self.pedals[pedal].mouse_up(point);
            }
        }

        if input.wheel.abs() > f32::EPSILON && inside {
            let over_knob = hovered.and_then(|pedal| {
                self.pedals[pedal]
                    .knob_at(point)
                    .map(|knob| (pedal, knob))
            });
            match over_knob {
                Some((pedal, knob)) => {
                    if let Some(knob) = self.pedals[pedal].knob_mut(knob) {
                        knob.nudge(input.wheel);
                    }
                }
                None => {
                    self.viewport.handle_wheel(input);
                }
            }
        }
    }

    fn pedal_at(&self, point: Vec2) -> Option<usize> {
        self.pedals
            .iter()
            .position(|panel| panel.bounds().contains(point))
    }

    pub fn draw(&self, pointer: Vec2) {
        draw_rectangle(
            self.bounds.x,
            self.bounds.y,
            self.bounds.w,
            self.bounds.h,
            BACKGROUND,
        );
        let view = self.viewport.bounds();
        draw_vertical_gradient(view, brighter(BLACK, 0.1), BLACK);

        for panel in &self.pedals {
            let screen = self.viewport.to_screen(panel.bounds());
            if screen.x + screen.w < view.x || screen.x > view.x + view.w {
                continue;
            }
            panel.draw(screen.point());
        }
        self.viewport.draw_scrollbar();

        // Toolbar is painted last so scrolled pedals never cover it.
        draw_rectangle(
            self.bounds.x,
            self.bounds.y,
            self.bounds.w,
            TOOLBAR_HEIGHT,
            BACKGROUND,
        );
        self.reset_button
            .draw(self.reset_button.bounds().contains(pointer));
        self.add_button.draw(self.add_button.bounds().contains(pointer));

        if let Some(menu) = &self.menu {
            menu.draw(pointer);
        }
    }
}

/// Bounds a pedal occupies inside the strip for 1-based position `k`.
pub fn slot_bounds(k: usize) -> Rect {
    Rect::new(
        PEDAL_MARGIN + SLOT_WIDTH * (k.saturating_sub(1)) as f32,
        PEDAL_TOP,
        PEDAL_WIDTH,
        PEDAL_HEIGHT,
    )
}
