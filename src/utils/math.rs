//! # Game Mathematics
//!
//! Grid geometry helpers.

use crate::game::Position;

/// Cells on the Bresenham line from `start` to `end`, both endpoints
/// included, in order.
///
/// # Examples
///
/// ```
/// use delve::utils::bresenham_line;
/// use delve::Position;
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 0));
/// assert_eq!(line.len(), 4);
/// assert_eq!(line[3], Position::new(3, 0));
/// ```
pub fn bresenham_line(start: Position, end: Position) -> Vec<Position> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };

    let mut error = dx + dy;
    let (mut x, mut y) = (start.x, start.y);
    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        cells.push(Position::new(x, y));
        if x == end.x && y == end.y {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }
    cells
}
