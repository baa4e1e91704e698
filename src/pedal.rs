use macroquad::prelude::Color;

use crate::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PedalType {
    Phaser,
    OverDrive,
    Spectrum,
    Distortion,
}

impl PedalType {
    /// Table order; menu ids are the 1-based positions in this list.
    pub const ALL: [PedalType; 4] = [
        PedalType::Phaser,
        PedalType::OverDrive,
        PedalType::Spectrum,
        PedalType::Distortion,
    ];

    /// Maps a menu id to a pedal. `0` means the menu was dismissed.
    pub fn from_choice(choice: usize) -> Result<Option<Self>, BoardError> {
        match choice {
            0 => Ok(None),
            id => Self::ALL
                .get(id - 1)
                .copied()
                .map(Some)
                .ok_or(BoardError::UnknownChoice(id)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PedalType::Phaser => "Phaser",
            PedalType::OverDrive => "Over Drive",
            PedalType::Spectrum => "Spectrum",
            PedalType::Distortion => "Distortion",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            PedalType::Phaser => "PH-1",
            PedalType::OverDrive => "OD-1",
            PedalType::Spectrum => "SP-1",
            PedalType::Distortion => "DS-1",
        }
    }

    pub fn colour(&self) -> Color {
        match self {
            PedalType::Phaser => Color::from_rgba(0x14, 0xBB, 0x67, 0xFF),
            PedalType::OverDrive => Color::from_rgba(0xFF, 0xD8, 0x5D, 0xFF),
            PedalType::Spectrum => Color::from_rgba(0xF9, 0x0C, 0x14, 0xFF),
            PedalType::Distortion => Color::from_rgba(0xE9, 0x6C, 0x2F, 0xFF),
        }
    }

    /// Labels for the (top, bottom) knobs.
    pub fn knob_labels(&self) -> (&'static str, &'static str) {
        match self {
            PedalType::Phaser => ("RATE", "DEPTH"),
            PedalType::OverDrive => ("LEVEL", "OVER DRIVE"),
            PedalType::Spectrum => ("BALANCE", "SPECTRUM"),
            PedalType::Distortion => ("TONE", "DIST"),
        }
    }
}
