use macroquad::prelude::*;
use tokio::sync::oneshot;

use crate::draw::draw_centered_text;
use crate::widgets::PointerInput;

/// Id the menu resolves to when dismissed without a selection.
pub const DISMISSED: usize = 0;

const ITEM_HEIGHT: f32 = 26.0;
const MENU_WIDTH: f32 = 140.0;
const MENU_FILL: Color = Color {
    r: 0.12,
    g: 0.15,
    b: 0.16,
    a: 0.98,
};
const MENU_HIGHLIGHT: Color = Color {
    r: 0.26,
    g: 0.44,
    b: 0.52,
    a: 1.0,
};

/// Pop-up list of items with ids 1..=N. The selection is delivered through a
/// one-shot channel so the caller never waits on the user.
pub struct PopupMenu {
    items: Vec<String>,
    bounds: Rect,
    responder: Option<oneshot::Sender<usize>>,
}

impl PopupMenu {
    /// Opens the menu under `target`, kept inside `area`.
    pub fn show_async(
        items: Vec<String>,
        target: Rect,
        area: Rect,
    ) -> (Self, oneshot::Receiver<usize>) {
        let (tx, rx) = oneshot::channel();
        let height = ITEM_HEIGHT * items.len() as f32;
        let x = (target.x + target.w - MENU_WIDTH).max(area.x);
        let y = (target.y + target.h).min(area.y + area.h - height);
        let menu = Self {
            items,
            bounds: Rect::new(x, y, MENU_WIDTH, height),
            responder: Some(tx),
        };
        (menu, rx)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.responder.is_some()
    }

    pub fn item_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y + index as f32 * ITEM_HEIGHT,
            self.bounds.w,
            ITEM_HEIGHT,
        )
    }

    fn item_at(&self, point: Vec2) -> Option<usize> {
        (0..self.items.len()).find(|index| self.item_rect(*index).contains(point))
    }

    /// Resolves the pending selection; later calls do nothing.
    pub fn resolve(&mut self, choice: usize) {
        if let Some(tx) = self.responder.take() {
            // A dropped receiver means nobody is waiting any more.
            let _ = tx.send(choice);
        }
    }

    /// Feeds one frame of input. Returns true while the menu captures it.
    pub fn update(&mut self, input: &PointerInput) -> bool {
        if !self.is_open() {
            return false;
        }
        if input.escape {
            self.resolve(DISMISSED);
        } else if input.pressed {
            let choice = self
                .item_at(input.position)
                .map(|index| index + 1)
                .unwrap_or(DISMISSED);
            self.resolve(choice);
        }
        true
    }

    pub fn draw(&self, pointer: Vec2) {
        if !self.is_open() {
            return;
        }
        draw_rectangle(
            self.bounds.x,
            self.bounds.y,
            self.bounds.w,
            self.bounds.h,
            MENU_FILL,
        );
        let hovered = self.item_at(pointer);
        for (index, item) in self.items.iter().enumerate() {
            let rect = self.item_rect(index);
            if hovered == Some(index) {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, MENU_HIGHLIGHT);
            }
            draw_centered_text(item, rect, 18, WHITE);
        }
        draw_rectangle_lines(
            self.bounds.x,
            self.bounds.y,
            self.bounds.w,
            self.bounds.h,
            1.0,
            Color::new(0.0, 0.0, 0.0, 0.6),
        );
    }
}

impl Drop for PopupMenu {
    fn drop(&mut self) {
        self.resolve(DISMISSED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (PopupMenu, oneshot::Receiver<usize>) {
        PopupMenu::show_async(
            vec!["One".into(), "Two".into(), "Three".into()],
            Rect::new(745.0, 5.0, 50.0, 25.0),
            Rect::new(0.0, 0.0, 800.0, 600.0),
        )
    }

    #[test]
    fn anchored_under_target_inside_area() {
        let (menu, _rx) = open();
        let first = menu.item_rect(0);
        assert_eq!(first.y, 30.0);
        assert_eq!(first.x + first.w, 795.0);
    }

    #[test]
    fn nothing_arrives_before_user_responds() {
        let (mut menu, mut rx) = open();
        assert!(menu.update(&PointerInput::drag(vec2(10.0, 300.0))));
        assert!(rx.try_recv().is_err());
        assert!(menu.is_open());
    }

    #[test]
    fn click_on_item_resolves_its_id() {
        let (mut menu, mut rx) = open();
        let third = menu.item_rect(2).center();
        menu.update(&PointerInput::press(third));
        assert_eq!(rx.try_recv(), Ok(3));
        assert!(!menu.is_open());
    }

    #[test]
    fn click_outside_dismisses() {
        let (mut menu, mut rx) = open();
        menu.update(&PointerInput::press(vec2(10.0, 300.0)));
        assert_eq!(rx.try_recv(), Ok(DISMISSED));
    }

    #[test]
    fn escape_dismisses() {
        let (mut menu, mut rx) = open();
        let input = PointerInput {
            escape: true,
            ..Default::default()
        };
        menu.update(&input);
        assert_eq!(rx.try_recv(), Ok(DISMISSED));
    }

    #[test]
    fn dropping_open_menu_dismisses() {
        let (menu, mut rx) = open();
        drop(menu);
        assert_eq!(rx.try_recv(), Ok(DISMISSED));
    }
}
