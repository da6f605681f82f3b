//! Pure line operations: run refinement, deleted-span detection and scoring.
//!
//! A line is a row or column snapshot of the field. These functions never
//! touch the field itself; the engine copies a line in, refines it and
//! writes the result back.

use crate::types::{DELETED_BALL, MIN_RUN, SCORE_PER_BALL};

/// Index range of the deleted balls within a line, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Number of cells covered. A span always covers at least one cell.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Clear the first run of `MIN_RUN`+ equal balls in `line`.
///
/// Scans left to right keeping a candidate run; when a differing ball ends a
/// run of sufficient length, scanning stops and the run's cells become
/// `DELETED_BALL` in a copy of the line. A qualifying run at the tail is
/// cleared too. Lines with no qualifying run come back unchanged; later runs
/// in the same line are left for subsequent passes.
pub fn refine_line(line: &[u8]) -> Vec<u8> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut start = 0;
    let mut len = 1;
    for (i, &ball) in line.iter().enumerate().skip(1) {
        if ball == line[start] {
            len += 1;
        } else if len >= MIN_RUN {
            break;
        } else {
            start = i;
            len = 1;
        }
    }

    if len < MIN_RUN {
        return line.to_vec();
    }

    let mut refined = line.to_vec();
    for cell in &mut refined[start..start + len] {
        *cell = DELETED_BALL;
    }
    refined
}

/// Whether the line holds any deleted ball.
pub fn contains_deleted(line: &[u8]) -> bool {
    line.contains(&DELETED_BALL)
}

/// Locate the first contiguous span of deleted balls, if any.
///
/// The scan stops at the first non-deleted ball after the span opened, so
/// only the leftmost zero run is reported.
pub fn deleted_span(line: &[u8]) -> Option<Span> {
    let mut span: Option<Span> = None;
    for (i, &ball) in line.iter().enumerate() {
        if ball == DELETED_BALL {
            match span.as_mut() {
                Some(span) => span.end = i,
                None => span = Some(Span { start: i, end: i }),
            }
        } else if span.is_some() {
            break;
        }
    }
    span
}

/// Score of a refined line: `SCORE_PER_BALL` per deleted ball.
pub fn calc_score(line: &[u8]) -> u32 {
    line.iter().filter(|&&ball| ball == DELETED_BALL).count() as u32 * SCORE_PER_BALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_whole_line() {
        assert_eq!(refine_line(&[1, 1, 1]), vec![0, 0, 0]);
        assert_eq!(refine_line(&[2, 2, 2, 2]), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_refine_no_run() {
        assert_eq!(refine_line(&[2, 1, 1]), vec![2, 1, 1]);
        assert_eq!(refine_line(&[1, 2, 1, 2]), vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_refine_first_run_only() {
        assert_eq!(
            refine_line(&[1, 2, 2, 2, 3, 4, 2]),
            vec![1, 0, 0, 0, 3, 4, 2]
        );
        // Two disjoint runs: only the leftmost is cleared
        assert_eq!(
            refine_line(&[1, 1, 1, 2, 3, 3, 3]),
            vec![0, 0, 0, 2, 3, 3, 3]
        );
    }

    #[test]
    fn test_refine_run_at_tail() {
        assert_eq!(refine_line(&[2, 1, 1, 1]), vec![2, 0, 0, 0]);
    }

    #[test]
    fn test_refine_degenerate_lines() {
        assert_eq!(refine_line(&[]), Vec::<u8>::new());
        assert_eq!(refine_line(&[1]), vec![1]);
        assert_eq!(refine_line(&[1, 1]), vec![1, 1]);
    }

    #[test]
    fn test_refine_idempotent_when_settled() {
        let once = refine_line(&[1, 2, 2, 1, 3]);
        assert_eq!(refine_line(&once), once);
    }

    #[test]
    fn test_deleted_span() {
        assert_eq!(
            deleted_span(&[1, 0, 0, 1, 1]),
            Some(Span { start: 1, end: 2 })
        );
        assert_eq!(deleted_span(&[1, 1, 1, 1, 1]), None);
        assert_eq!(deleted_span(&[0, 0, 1]), Some(Span { start: 0, end: 1 }));
        assert_eq!(deleted_span(&[1, 1, 0]), Some(Span { start: 2, end: 2 }));
    }

    #[test]
    fn test_deleted_span_stops_at_first_gap() {
        // Second zero run is left for a later pass
        assert_eq!(
            deleted_span(&[0, 0, 1, 0, 0]),
            Some(Span { start: 0, end: 1 })
        );
    }

    #[test]
    fn test_span_len() {
        assert_eq!(Span { start: 1, end: 3 }.len(), 3);
        assert_eq!(Span { start: 4, end: 4 }.len(), 1);
    }

    #[test]
    fn test_calc_score() {
        assert_eq!(calc_score(&[1, 0, 0, 0]), 30);
        assert_eq!(calc_score(&[1, 2]), 0);
        assert_eq!(calc_score(&[3, 3, 0, 0, 0]), 30);
    }
}
