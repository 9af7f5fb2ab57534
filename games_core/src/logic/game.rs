use crate::engine::{Move, SearchGame};
use crate::logic::board::{BoardCoordinate, Grid};
use crate::logic::error::MoveError;
use crate::logic::{GameStatus, PieceLike, Playable, Side};
use log::{info, trace};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Board, side to move and the rule-specific bookkeeping of one game variant.
///
/// `apply` and `revert` are the single paired mutation primitive: legality
/// filtering, the validated `make_move`/`undo` pair, and the search all go
/// through them. `revert(&apply(..))` restores every field exactly.
pub trait Position: Clone + Default + PartialEq + Debug {
    type Side: Side;
    type Piece: PieceLike<Side = Self::Side>;
    type Record: Clone + Debug + PartialEq;

    const GAME_ID: &'static str;

    fn board(&self) -> &Grid<Self::Piece>;
    fn turn(&self) -> Self::Side;
    fn move_count(&self) -> u32;

    /// Pieces of `side` that have been captured, in capture order.
    fn captured(&self, side: Self::Side) -> &[Self::Piece];

    /// Destinations allowed by movement, blocking and capture rules, ignoring
    /// whether the mover's own king is left in check.
    fn pseudo_moves(&self, from: BoardCoordinate, out: &mut Vec<BoardCoordinate>);

    /// Moves without validation and flips the side to move. `None` if `from`
    /// is empty.
    fn apply(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Option<Self::Record>;

    fn revert(&mut self, record: &Self::Record);

    fn is_in_check(&self, side: Self::Side) -> bool;
}

/// Pseudo-legal destinations of the piece on `from` that do not leave its
/// owner in check. The position is mutated and restored for each candidate.
pub fn legal_targets<P: Position>(position: &mut P, from: BoardCoordinate) -> Vec<BoardCoordinate> {
    let Some(piece) = position.board().get(from) else {
        return Vec::new();
    };
    let mover = piece.owner();

    let mut targets = Vec::new();
    position.pseudo_moves(from, &mut targets);
    targets.retain(|&to| match position.apply(from, to) {
        Some(record) => {
            let safe = !position.is_in_check(mover);
            position.revert(&record);
            safe
        }
        None => false,
    });
    targets
}

/// All legal `(from, to)` pairs for `side`, in board order.
pub fn legal_moves<P: Position>(position: &mut P, side: P::Side) -> Vec<Move> {
    let origins = pieces_of(position, side);
    let mut moves = Vec::new();
    for from in origins {
        moves.extend(legal_targets(position, from).into_iter().map(|to| Move::new(from, to)));
    }
    moves
}

fn has_legal_move<P: Position>(position: &mut P, side: P::Side) -> bool {
    pieces_of(position, side)
        .into_iter()
        .any(|from| !legal_targets(position, from).is_empty())
}

fn pieces_of<P: Position>(position: &P, side: P::Side) -> Vec<BoardCoordinate> {
    position
        .board()
        .occupied()
        .filter(|(_, piece)| piece.owner() == side)
        .map(|(pos, _)| pos)
        .collect()
}

/// The authoritative game: a position plus terminal status and undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, P::Side: Serialize, P::Record: Serialize",
    deserialize = "P: Deserialize<'de>, P::Side: Deserialize<'de>, P::Record: Deserialize<'de>"
))]
pub struct GameState<P: Position> {
    position: P,
    status: GameStatus<P::Side>,
    history: Vec<P::Record>,
}

impl<P: Position> Default for GameState<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Position> GameState<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: P::default(),
            status: GameStatus::Playing,
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary position; the status is evaluated immediately.
    #[must_use]
    pub fn from_position(position: P) -> Self {
        let mut state = Self {
            position,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        state.check_game_over();
        state
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn position(&self) -> &P {
        &self.position
    }

    pub fn board(&self) -> &Grid<P::Piece> {
        self.position.board()
    }

    pub fn current_player(&self) -> P::Side {
        self.position.turn()
    }

    pub fn status(&self) -> GameStatus<P::Side> {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn get_winner(&self) -> Option<P::Side> {
        self.status.winner()
    }

    pub fn move_count(&self) -> u32 {
        self.position.move_count()
    }

    pub fn captured(&self, side: P::Side) -> &[P::Piece] {
        self.position.captured(side)
    }

    pub fn history(&self) -> &[P::Record] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn get_piece(&self, pos: BoardCoordinate) -> Option<P::Piece> {
        self.position.board().get(pos)
    }

    pub fn is_in_check(&self, side: P::Side) -> bool {
        self.position.is_in_check(side)
    }

    /// Legal destinations for the piece on `from`, whichever side owns it.
    pub fn get_valid_moves(&self, from: BoardCoordinate) -> Vec<BoardCoordinate> {
        let mut scratch = self.position.clone();
        legal_targets(&mut scratch, from)
    }

    /// Every legal move of the side to move.
    pub fn get_all_moves(&self) -> Vec<Move> {
        let mut scratch = self.position.clone();
        let side = scratch.turn();
        legal_moves(&mut scratch, side)
    }

    pub fn try_move(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let board = self.position.board();
        if !board.contains(from) || !board.contains(to) {
            return Err(MoveError::OutOfBounds);
        }
        let piece = board.get(from).ok_or(MoveError::NoPieceAtSource)?;
        if piece.owner() != self.position.turn() {
            return Err(MoveError::NotYourTurn);
        }

        if !legal_targets(&mut self.position, from).contains(&to) {
            trace!("{}: rejected {from:?} -> {to:?}", P::GAME_ID);
            return Err(MoveError::IllegalMove);
        }

        let record = self
            .position
            .apply(from, to)
            .ok_or(MoveError::NoPieceAtSource)?;
        self.history.push(record);
        self.check_game_over();
        Ok(())
    }

    /// `false` (and no mutation) unless `to` is a legal destination from `from`.
    pub fn make_move(&mut self, from: BoardCoordinate, to: BoardCoordinate) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Takes back the last move. The status always returns to `Playing`.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.position.revert(&record);
        self.status = GameStatus::Playing;
        true
    }

    fn check_game_over(&mut self) {
        let side = self.position.turn();
        if has_legal_move(&mut self.position, side) {
            self.status = GameStatus::Playing;
            return;
        }

        self.status = if self.position.is_in_check(side) {
            GameStatus::Won(side.opposite())
        } else {
            GameStatus::Draw
        };
        info!(
            "{}: game over after {} moves: {:?}",
            P::GAME_ID,
            self.position.move_count(),
            self.status
        );
    }
}

impl<P: Position> SearchGame for GameState<P> {
    type Side = P::Side;
    type Move = Move;
    type Undo = P::Record;

    fn side_to_move(&self) -> P::Side {
        self.position.turn()
    }

    fn legal_moves(&mut self) -> Vec<Move> {
        let side = self.position.turn();
        legal_moves(&mut self.position, side)
    }

    fn capture_value(&self, mv: Move) -> i32 {
        self.position.board().get(mv.to).map_or(0, PieceLike::value)
    }

    fn play_unchecked(&mut self, mv: Move) -> Option<P::Record> {
        self.position.apply(mv.from, mv.to)
    }

    fn unplay(&mut self, undo: P::Record) {
        self.position.revert(&undo);
    }

    fn outcome(&self, legal_moves: &[Move]) -> Option<GameStatus<P::Side>> {
        if !legal_moves.is_empty() {
            return None;
        }
        let side = self.position.turn();
        Some(if self.position.is_in_check(side) {
            GameStatus::Won(side.opposite())
        } else {
            GameStatus::Draw
        })
    }

    fn detached(&self) -> Self {
        Self {
            position: self.position.clone(),
            status: self.status,
            history: Vec::new(),
        }
    }
}

impl<P: Position + Send + 'static> Playable for GameState<P>
where
    P::Record: Send,
{
    const GAME_ID: &'static str = P::GAME_ID;

    fn status(&self) -> GameStatus<P::Side> {
        self.status
    }

    fn play(&mut self, mv: Move) -> bool {
        self.make_move(mv.from, mv.to)
    }

    fn undo(&mut self) -> bool {
        Self::undo(self)
    }

    fn can_undo(&self) -> bool {
        Self::can_undo(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn result_score(&self) -> Option<u32> {
        self.status.winner().map(|_| self.position.move_count())
    }
}
