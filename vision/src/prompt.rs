/// Instruction sent with every photo. The reply contract it describes is
/// what [`crate::interpret_reply`] validates.
pub const DETECTION_PROMPT: &str = "\
You are reading a photograph of a physical chess board.

First decide whether the image shows a chess board at all. If it does not, \
or the board is too obscured to read, reply with exactly {\"error\": \"NO_BOARD\"}.

Otherwise reply with a JSON array of 8 rows, each an array of 8 cells. \
Row 0 is rank 8 (Black's back rank) and row 7 is rank 1; within a row, \
cell 0 is file a and cell 7 is file h. Orient the board from White's side \
even if the photo was taken from another angle.

Each cell is null for an empty square, or a single FEN piece letter: \
uppercase KQRBNP for White pieces, lowercase kqrbnp for Black pieces.

Reply with the JSON only, no commentary.";
