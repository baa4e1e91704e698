pub mod board;
pub mod draw;
pub mod error;
pub mod look_and_feel;
pub mod menu;
pub mod panel;
pub mod pedal;
pub mod widgets;
