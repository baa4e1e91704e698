use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// Menu id that does not map to any pedal type.
    #[error("unknown pedal choice {0}")]
    UnknownChoice(usize),
}
