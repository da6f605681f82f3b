//! Next-move oracle: sliding 3x3 window pattern search.
//!
//! A move is possible iff some 3x3 window of the field holds three equal
//! balls in one of 17 catalogued shapes. Each shape is a set of three cell
//! offsets within the window such that one adjacent swap lines the three
//! balls up into a run. The catalogue is the authoritative definition of
//! "a move exists", not a heuristic to re-derive.

use crate::types::Field;

/// Three (row, col) offsets within a 3x3 window.
type Pattern = [(usize, usize); 3];

/// Shapes resolvable by swapping the odd ball sideways into the run's line.
const R_PATTERNS: [Pattern; 13] = [
    [(0, 0), (0, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 1)],
    [(0, 2), (1, 2), (2, 1)],
    [(0, 2), (0, 1), (1, 0)],
    [(0, 1), (1, 0), (2, 0)],
    [(1, 2), (2, 1), (2, 0)],
    [(0, 2), (1, 1), (2, 1)],
    [(0, 0), (1, 1), (2, 1)],
    [(1, 2), (1, 1), (2, 0)],
    [(0, 0), (1, 1), (1, 2)],
    [(1, 0), (1, 1), (0, 2)],
    [(1, 0), (2, 1), (2, 2)],
    [(0, 1), (1, 2), (2, 2)],
];

/// V-shaped variants: two aligned balls with the third one row off-center.
const V_PATTERNS: [Pattern; 4] = [
    [(0, 0), (1, 1), (0, 2)],
    [(0, 2), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 0)],
];

fn matches(window: &[[u8; 3]; 3], pattern: &Pattern, ball: u8) -> bool {
    pattern.iter().all(|&(r, c)| window[r][c] == ball)
}

/// Whether a single window admits a run-creating swap.
pub fn window_has_move(window: &[[u8; 3]; 3]) -> bool {
    // At most 9 distinct balls per window
    let mut seen: Vec<u8> = Vec::with_capacity(9);
    for row in window {
        for &ball in row {
            if !seen.contains(&ball) {
                seen.push(ball);
            }
        }
    }

    seen.iter().any(|&ball| {
        R_PATTERNS
            .iter()
            .chain(V_PATTERNS.iter())
            .any(|pattern| matches(window, pattern, ball))
    })
}

/// Whether any legal swap on `field` would create a run.
///
/// Slides the window's top-left corner over all valid positions;
/// O((n-2)^2 * 17 * colors).
pub fn can_make_next_move(field: &Field) -> bool {
    let limit = field.size().saturating_sub(2);
    for row in 0..limit {
        for col in 0..limit {
            if window_has_move(&field.window3(row, col)) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_patterns() -> Vec<Pattern> {
        R_PATTERNS.iter().chain(V_PATTERNS.iter()).copied().collect()
    }

    /// Window with ball 1 at the pattern cells and unique fillers elsewhere,
    /// so no other triple of equal balls can exist.
    fn window_for(pattern: &Pattern) -> [[u8; 3]; 3] {
        let mut window = [[0u8; 3]; 3];
        let mut filler = 2u8;
        for (r, row) in window.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if pattern.contains(&(r, c)) {
                    *cell = 1;
                } else {
                    *cell = filler;
                    filler += 1;
                }
            }
        }
        window
    }

    #[test]
    fn test_catalogue_size() {
        assert_eq!(all_patterns().len(), 17);
    }

    #[test]
    fn test_every_pattern_detected() {
        for pattern in all_patterns() {
            let window = window_for(&pattern);
            assert!(
                window_has_move(&window),
                "pattern {pattern:?} not detected in {window:?}"
            );
        }
    }

    #[test]
    fn test_all_distinct_window_has_no_move() {
        let window = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        assert!(!window_has_move(&window));
    }

    #[test]
    fn test_straight_run_is_not_a_move() {
        // An already-complete run is scan's business, not the oracle's
        let window = [[1, 1, 1], [2, 3, 4], [5, 6, 7]];
        assert!(!window_has_move(&window));
    }

    /// 2x2 block tiling: no three equal balls ever share a catalogued shape.
    fn tiled_rows() -> Vec<Vec<u8>> {
        (0..5)
            .map(|r| {
                (0..5)
                    .map(|c| ((r % 2) * 2 + c % 2) as u8 + 1)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_field_with_no_move() {
        let field = Field::from_rows(&tiled_rows());
        assert!(!can_make_next_move(&field));
    }

    #[test]
    fn test_field_with_move() {
        let mut rows = tiled_rows();
        // Plant a V shape of ball 1 in the window at (2, 2)
        rows[2][2] = 1;
        rows[3][3] = 1;
        rows[4][2] = 1;
        let field = Field::from_rows(&rows);
        assert!(can_make_next_move(&field));
    }
}
