//! Validation of model replies and grid-to-FEN conversion.

use serde_json::Value;

use crate::error::{DetectionError, DetectionResult};

/// Fields appended to every detected placement. A photo says nothing about
/// side to move or castling rights, so these are fixed guesses.
pub const DETECTED_FEN_SUFFIX: &str = " w KQkq - 0 1";

const NO_BOARD_MARKER: &str = "NO_BOARD";

/// Validate a model reply and convert it to FEN.
///
/// - not JSON → `General`
/// - `{"error": "NO_BOARD"}` → `NoBoardFound`
/// - anything but 8 rows of 8 null-or-string cells → `General`
/// - a piece code that [`piece_letter`] does not recognise → `General`
pub fn interpret_reply(text: &str) -> DetectionResult<String> {
    let value: Value = serde_json::from_str(text.trim())?;

    if let Some(marker) = value.get("error") {
        return if marker.as_str() == Some(NO_BOARD_MARKER) {
            Err(DetectionError::NoBoardFound)
        } else {
            Err(DetectionError::General(format!(
                "model reported an error: {}",
                marker
            )))
        };
    }

    let rows = value
        .as_array()
        .filter(|rows| rows.len() == 8)
        .ok_or_else(|| DetectionError::General("expected an array of 8 rows".to_string()))?;

    let mut grid = Vec::with_capacity(8);
    for (index, row) in rows.iter().enumerate() {
        let cells = row
            .as_array()
            .filter(|cells| cells.len() == 8)
            .ok_or_else(|| DetectionError::General(format!("row {} is not 8 cells", index)))?;
        let row = cells
            .iter()
            .map(|cell| match cell {
                Value::Null => Ok(None),
                Value::String(s) if is_empty_code(s.trim()) || piece_letter(s).is_some() => {
                    Ok(Some(s.clone()))
                }
                Value::String(s) => Err(DetectionError::General(format!(
                    "unrecognised piece code {:?} in row {}",
                    s, index
                ))),
                other => Err(DetectionError::General(format!(
                    "unexpected cell {} in row {}",
                    other, index
                ))),
            })
            .collect::<DetectionResult<Vec<_>>>()?;
        grid.push(row);
    }

    Ok(grid_to_fen(&grid))
}

/// FEN letter for a piece code. One-letter codes are FEN letters already.
/// Two-letter codes carry a colour prefix, `w` or `b` in either case, so
/// `wN` is `N` and `bN` is `n`.
pub fn piece_letter(code: &str) -> Option<char> {
    let code = code.trim();
    let mut chars = code.chars();
    let letter = match (chars.next(), chars.next(), chars.next()) {
        (Some(letter), None, None) => letter,
        (Some(prefix), Some(piece), None) => match prefix.to_ascii_lowercase() {
            'w' => piece.to_ascii_uppercase(),
            'b' => piece.to_ascii_lowercase(),
            _ => return None,
        },
        _ => return None,
    };
    "KQRBNPkqrbnp".contains(letter).then_some(letter)
}

/// Convert an 8x8 grid (row 0 = rank 8) to a FEN string. Runs of empty cells
/// become digits and each piece code becomes its single FEN letter, so every
/// rank stays eight squares wide. An unrecognised code is written as `?`,
/// which no FEN parser accepts.
pub fn grid_to_fen(grid: &[Vec<Option<String>>]) -> String {
    let placement = grid
        .iter()
        .map(|row| {
            let mut rank = String::new();
            let mut empty = 0u32;
            for cell in row {
                match cell.as_deref().map(str::trim) {
                    Some(code) if !is_empty_code(code) => {
                        if empty > 0 {
                            rank.push_str(&empty.to_string());
                            empty = 0;
                        }
                        rank.push(piece_letter(code).unwrap_or('?'));
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                rank.push_str(&empty.to_string());
            }
            rank
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("{}{}", placement, DETECTED_FEN_SUFFIX)
}

fn is_empty_code(code: &str) -> bool {
    code.is_empty() || code.eq_ignore_ascii_case("empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start_grid_json() -> String {
        r#"[
            ["r","n","b","q","k","b","n","r"],
            ["p","p","p","p","p","p","p","p"],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,"P",null,null,null],
            [null,null,null,null,null,null,null,null],
            ["P","P","P","P",null,"P","P","P"],
            ["R","N","B","Q","K","B","N","R"]
        ]"#
        .to_string()
    }

    #[test]
    fn converts_a_valid_grid() {
        assert_eq!(
            interpret_reply(&start_grid_json()).unwrap(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn empty_string_and_word_count_as_empty() {
        let mut grid = vec![vec![None; 8]; 8];
        grid[0][0] = Some("".to_string());
        grid[0][1] = Some("EMPTY".to_string());
        grid[0][2] = Some("k".to_string());
        grid[7][7] = Some("Empty".to_string());
        grid[7][6] = Some("K".to_string());
        assert_eq!(grid_to_fen(&grid), "2k5/8/8/8/8/8/8/6K1 w KQkq - 0 1");
    }

    #[test]
    fn colour_prefixed_codes_become_fen_letters() {
        let mut grid = vec![vec![None; 8]; 8];
        grid[0][4] = Some("bK".to_string());
        grid[0][5] = Some("BQ".to_string());
        grid[7][4] = Some("wK".to_string());
        grid[7][0] = Some("Wr".to_string());
        assert_eq!(grid_to_fen(&grid), "4kq2/8/8/8/8/8/8/R3K3 w KQkq - 0 1");
    }

    #[test]
    fn piece_letters() {
        assert_eq!(piece_letter("q"), Some('q'));
        assert_eq!(piece_letter(" wP "), Some('P'));
        assert_eq!(piece_letter("bp"), Some('p'));
        assert_eq!(piece_letter("x"), None);
        assert_eq!(piece_letter("PP"), None);
        assert_eq!(piece_letter("wX"), None);
        assert_eq!(piece_letter("wPx"), None);
    }

    #[test]
    fn unrecognised_code_is_general() {
        let junk = start_grid_json().replacen(r#""q""#, r#""zz""#, 1);
        assert!(matches!(
            interpret_reply(&junk),
            Err(DetectionError::General(_))
        ));
        let prefixed = start_grid_json().replacen(r#""q""#, r#""bQ""#, 1);
        assert!(interpret_reply(&prefixed).unwrap().starts_with("rnbqkbnr/"));
    }

    #[test]
    fn no_board_marker() {
        assert_eq!(
            interpret_reply(r#"{"error": "NO_BOARD"}"#),
            Err(DetectionError::NoBoardFound)
        );
    }

    #[test]
    fn other_error_objects_are_general() {
        assert!(matches!(
            interpret_reply(r#"{"error": "BLURRY"}"#),
            Err(DetectionError::General(_))
        ));
    }

    #[test]
    fn wrong_length_is_general_not_no_board() {
        let seven = r#"[[null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null],
            [null,null,null,null,null,null,null,null]]"#;
        assert!(matches!(
            interpret_reply(seven),
            Err(DetectionError::General(_))
        ));
        assert!(matches!(
            interpret_reply(r#"{"board": []}"#),
            Err(DetectionError::General(_))
        ));
    }

    #[test]
    fn non_json_is_general() {
        assert!(matches!(
            interpret_reply("I see a chessboard with..."),
            Err(DetectionError::General(_))
        ));
    }

    #[test]
    fn short_row_and_bad_cell_are_general() {
        let short_row = start_grid_json().replacen(r#"["r","n","b","q","k","b","n","r"]"#, r#"["r","n"]"#, 1);
        assert!(matches!(
            interpret_reply(&short_row),
            Err(DetectionError::General(_))
        ));
        let numeric = start_grid_json().replacen(r#""q""#, "5", 1);
        assert!(matches!(
            interpret_reply(&numeric),
            Err(DetectionError::General(_))
        ));
    }

    fn cell() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("empty".to_string())),
            "[KQRBNPkqrbnp]".prop_map(Some),
            "[wWbB][KQRBNPkqrbnp]".prop_map(Some),
            "[a-z]{2}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn every_rank_sums_to_eight(grid in prop::collection::vec(prop::collection::vec(cell(), 8), 8)) {
            let fen = grid_to_fen(&grid);
            let placement = fen.split_whitespace().next().unwrap();
            let ranks: Vec<&str> = placement.split('/').collect();
            prop_assert_eq!(ranks.len(), 8);
            for rank in ranks {
                let width: u32 = rank
                    .chars()
                    .map(|c| c.to_digit(10).unwrap_or(1))
                    .sum();
                prop_assert_eq!(width, 8);
            }
            prop_assert!(fen.ends_with(DETECTED_FEN_SUFFIX));
        }
    }
}
