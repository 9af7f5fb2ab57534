use thiserror::Error;

/// Why a requested move was refused. The state is never mutated when one of
/// these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("coordinate is outside the board")]
    OutOfBounds,
    #[error("no piece at the source square")]
    NoPieceAtSource,
    #[error("that piece belongs to the side not on move")]
    NotYourTurn,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("cell is already occupied")]
    CellOccupied,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("position string is empty")]
    Empty,
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} does not describe exactly {expected} cells")]
    RowWidth { row: usize, expected: usize },
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("unknown side to move '{0}'")]
    UnknownSide(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("move number {0} is out of range")]
    MoveNumber(u32),
}
