use std::fmt::Display;

use tictactoe_engine::{Board, Marker};

const ROW_SEPARATOR: &str = "-----+-----+-----";
const ROW_PADDING: &str = "     |     |";

/// Joins items for a sentence: `1`, `1 or 2`, `1, 2, or 3`.
pub(crate) fn joinor<T>(items: &[T], delimiter: &str, word: &str) -> String
where
    T: Display,
{
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} {word} {second}"),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(delimiter);
            format!("{init}{delimiter}{word} {last}")
        }
    }
}

/// Renders the board as the classic 3×3 grid, one string per line.
pub(crate) fn board_lines(board: &Board) -> Vec<String> {
    let mut lines = Vec::with_capacity(11);
    for (i, [a, b, c]) in board.rows().enumerate() {
        if i > 0 {
            lines.push(ROW_SEPARATOR.to_owned());
        }
        lines.push(ROW_PADDING.to_owned());
        lines.push(format!("  {a}  |  {b}  |  {c}"));
        lines.push(ROW_PADDING.to_owned());
    }
    lines
}

/// Describes the marker for a header line: "an X" / "an O".
pub(crate) fn marker_phrase(marker: Marker) -> String {
    format!("an {marker}")
}
