//! The grid engine: generation with retry, tentative moves, the cascading
//! scan and refill.
//!
//! One engine instance exclusively owns one field. A turn is synchronous:
//! `try_move`, then `scan` until the field settles, then optionally
//! `can_make_next_move` to detect a stalled game.

use crate::lines::{calc_score, contains_deleted, deleted_span, refine_line};
use crate::oracle;
use crate::rng::BallRng;
use crate::types::{
    Coord, Direction, EngineError, Field, LineKind, MoveOutcome, DEFAULT_COLOR_COUNT,
    DELETED_BALL, MAX_FIELD_SIZE, MIN_FIELD_SIZE, RUN_FREE_CHECK_LIMIT,
};

pub struct GridEngine {
    field: Option<Field>,
    colors: u8,
    rng: BallRng,
}

impl GridEngine {
    pub fn new() -> Self {
        Self::with_rng(BallRng::new())
    }

    /// Inject the random source, seeded for deterministic tests.
    pub fn with_rng(rng: BallRng) -> Self {
        Self {
            field: None,
            colors: DEFAULT_COLOR_COUNT,
            rng,
        }
    }

    /// Engine over a prepared field, bypassing validity checks.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let mut engine = Self::new();
        engine.set_field(rows);
        engine
    }

    /// Replace the field wholesale, bypassing validity checks.
    pub fn set_field(&mut self, rows: &[Vec<u8>]) {
        self.field = Some(Field::from_rows(rows));
    }

    pub fn field(&self) -> Result<&Field, EngineError> {
        self.field.as_ref().ok_or(EngineError::FieldNotInitialized)
    }

    fn field_mut(&mut self) -> Result<&mut Field, EngineError> {
        self.field.as_mut().ok_or(EngineError::FieldNotInitialized)
    }

    /// Defensive copy of the field as nested rows.
    pub fn snapshot(&self) -> Result<Vec<Vec<u8>>, EngineError> {
        Ok(self.field()?.to_rows())
    }

    /// Number of ball colors in play.
    pub fn color_count(&self) -> u8 {
        self.colors
    }

    /// Fill an `n * n` field with uniformly-random balls in `[1, colors]`,
    /// retrying until the game is startable: at least one run-creating move
    /// exists, and (for fields up to `RUN_FREE_CHECK_LIMIT`) no run is
    /// already present. Returns the number of attempts.
    pub fn generate(&mut self, n: usize, colors: u8) -> Result<u32, EngineError> {
        if !(MIN_FIELD_SIZE..=MAX_FIELD_SIZE).contains(&n) {
            return Err(EngineError::InvalidSize(n));
        }
        if colors == 0 {
            return Err(EngineError::InvalidColorCount(colors));
        }

        self.colors = colors;
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut field = Field::new(n);
            for cell in field.cells_mut() {
                *cell = self.rng.ball(colors);
            }
            if Self::startable(&field) {
                self.field = Some(field);
                return Ok(attempts);
            }
        }
    }

    fn startable(field: &Field) -> bool {
        let can_move = oracle::can_make_next_move(field);
        if field.size() > RUN_FREE_CHECK_LIMIT {
            // Scanning every line of a big field on each retry is too slow,
            // and a pre-existing run just grants the player free points
            return can_move;
        }
        let run_free =
            find_score_line(field, LineKind::Row).is_none()
                && find_score_line(field, LineKind::Column).is_none();
        run_free && can_move
    }

    /// Attempt to swap `from` and `to`.
    ///
    /// On `Changed` the swap stays applied with its runs intact; `scan`
    /// clears them. On any other outcome the field is untouched.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, EngineError> {
        let field = self.field.as_mut().ok_or(EngineError::FieldNotInitialized)?;

        if !field.in_bounds(from) || !field.in_bounds(to) {
            return Ok(MoveOutcome::Illegal);
        }
        if field.ball(from) == field.ball(to) {
            return Ok(MoveOutcome::IllegalSameColor);
        }
        if Direction::between(from, to) == Direction::Illegal {
            return Ok(MoveOutcome::Illegal);
        }

        field.swap(from, to);
        let made_run = contains_deleted(&refine_line(field.row(to.row)))
            || contains_deleted(&refine_line(&field.copy_column(to.col)));
        if made_run {
            Ok(MoveOutcome::Changed)
        } else {
            field.swap(from, to);
            Ok(MoveOutcome::Unchanged)
        }
    }

    /// Whether any legal swap anywhere on the field would create a run.
    pub fn can_make_next_move(&self) -> Result<bool, EngineError> {
        Ok(oracle::can_make_next_move(self.field()?))
    }

    /// Clear and refill runs until the field is stable.
    ///
    /// Rows are searched last-to-first, then columns; each hit reports
    /// `on_score` first, writes the refined line back, fires
    /// `on_field_changed`, refills the line and restarts the search from
    /// rows (a refill may create new runs anywhere). `on_score` returning
    /// `true` halts the cascade right after the report, before the line is
    /// written.
    pub fn scan<S, F>(&mut self, mut on_score: S, mut on_field_changed: F) -> Result<(), EngineError>
    where
        S: FnMut(u32) -> bool,
        F: FnMut(),
    {
        self.field()?;

        loop {
            let field = self.field_mut()?;
            let (kind, pos, refined) = match find_score_line(field, LineKind::Row) {
                Some((pos, refined)) => (LineKind::Row, pos, refined),
                None => match find_score_line(field, LineKind::Column) {
                    Some((pos, refined)) => (LineKind::Column, pos, refined),
                    None => break,
                },
            };

            if on_score(calc_score(&refined)) {
                return Ok(());
            }
            match kind {
                LineKind::Row => field.set_row(pos, &refined),
                LineKind::Column => field.set_column(pos, &refined),
            }
            on_field_changed();
            self.refill_with(pos, kind, None)?;
        }
        Ok(())
    }

    /// Refill a line that was partly or fully cleared.
    ///
    /// Rows and columns refill differently, and the UI's falling-ball
    /// visuals depend on the difference: a row pulls the rows above it down
    /// through the cleared column span and feeds fresh balls into row 0,
    /// while a column compacts its survivors and prepends fresh balls.
    /// `fixed` substitutes a constant ball for deterministic tests.
    pub fn refill_with(
        &mut self,
        pos: usize,
        kind: LineKind,
        fixed: Option<u8>,
    ) -> Result<(), EngineError> {
        match kind {
            LineKind::Row => self.refill_row(pos, fixed),
            LineKind::Column => self.refill_column(pos, fixed),
        }
    }

    fn refill_row(&mut self, row: usize, fixed: Option<u8>) -> Result<(), EngineError> {
        let Self { field, rng, colors } = self;
        let field = field.as_mut().ok_or(EngineError::FieldNotInitialized)?;

        let span = match deleted_span(field.row(row)) {
            Some(span) => span,
            None => return Ok(()),
        };

        // Shift every row above down into the span's column range
        for r in (1..=row).rev() {
            for c in span.start..=span.end {
                let above = field.ball(Coord::new(r - 1, c));
                field.set_ball(Coord::new(r, c), above);
            }
        }
        let fresh = rng.balls(span.len(), *colors, fixed);
        for (c, &ball) in (span.start..=span.end).zip(fresh.iter()) {
            field.set_ball(Coord::new(0, c), ball);
        }
        Ok(())
    }

    fn refill_column(&mut self, col: usize, fixed: Option<u8>) -> Result<(), EngineError> {
        let Self { field, rng, colors } = self;
        let field = field.as_mut().ok_or(EngineError::FieldNotInitialized)?;

        let column = field.copy_column(col);
        let survivors: Vec<u8> = column
            .iter()
            .copied()
            .filter(|&ball| ball != DELETED_BALL)
            .collect();
        let mut line = rng.balls(column.len() - survivors.len(), *colors, fixed);
        line.extend(survivors);
        field.set_column(col, &line);
        Ok(())
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the last line of the given kind that refines to a change.
///
/// Returns the line's position and its refined copy; the field itself is
/// not modified.
fn find_score_line(field: &Field, kind: LineKind) -> Option<(usize, Vec<u8>)> {
    for pos in (0..field.size()).rev() {
        let line = match kind {
            LineKind::Row => field.copy_row(pos),
            LineKind::Column => field.copy_column(pos),
        };
        let refined = refine_line(&line);
        if contains_deleted(&refined) {
            return Some((pos, refined));
        }
    }
    None
}
