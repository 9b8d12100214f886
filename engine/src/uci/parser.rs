use crate::{EngineInfo, Score, UciError};
use chess::parse_uci_move;
use cozy_chess::Move;

/// Incoming message from UCI engine
#[derive(Debug, Clone)]
pub enum UciMessage {
    Id { name: String, value: String },
    UciOk,
    ReadyOk,
    /// `mv` is `None` for `bestmove (none)`. A ponder suggestion is ignored.
    BestMove { mv: Option<Move> },
    Info(EngineInfo),
}

/// Parse a UCI message line
pub fn parse_uci_message(line: &str) -> Result<UciMessage, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.first() {
        Some(&"uciok") => Ok(UciMessage::UciOk),
        Some(&"readyok") => Ok(UciMessage::ReadyOk),

        Some(&"id") => {
            if tokens.len() < 3 {
                return Err(UciError::MalformedMessage(line.to_string()));
            }
            let name = tokens[1].to_string();
            let value = tokens[2..].join(" ");
            Ok(UciMessage::Id { name, value })
        }

        Some(&"bestmove") => {
            let token = tokens
                .get(1)
                .ok_or_else(|| UciError::MalformedMessage(line.to_string()))?;
            let mv = match *token {
                "(none)" | "0000" => None,
                other => {
                    Some(parse_uci_move(other).ok_or_else(|| UciError::InvalidMove(other.into()))?)
                }
            };
            Ok(UciMessage::BestMove { mv })
        }

        Some(&"info") => Ok(UciMessage::Info(parse_info_line(&tokens[1..]))),

        _ => Err(UciError::UnknownMessage(line.to_string())),
    }
}

/// Parse the fields of an "info" line. Unknown keywords are skipped.
fn parse_info_line(tokens: &[&str]) -> EngineInfo {
    let mut info = EngineInfo::default();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                info.depth = tokens.get(i).and_then(|s| s.parse().ok());
            }
            "score" => {
                i += 1;
                if let Some(&score_type) = tokens.get(i) {
                    i += 1;
                    if let Some(value_str) = tokens.get(i) {
                        info.score = match score_type {
                            "cp" => value_str.parse().ok().map(Score::Centipawns),
                            "mate" => value_str.parse().ok().map(Score::Mate),
                            _ => None,
                        };
                    }
                }
            }
            "pv" => {
                i += 1;
                while i < tokens.len() && !is_keyword(tokens[i]) {
                    if let Some(mv) = parse_uci_move(tokens[i]) {
                        info.pv.push(mv);
                    }
                    i += 1;
                }
                continue;
            }
            "string" => break,
            _ => {}
        }
        i += 1;
    }

    info
}

fn is_keyword(token: &str) -> bool {
    matches!(
        token,
        "depth"
            | "seldepth"
            | "time"
            | "nodes"
            | "score"
            | "pv"
            | "multipv"
            | "currmove"
            | "currmovenumber"
            | "hashfull"
            | "nps"
            | "tbhits"
            | "cpuload"
            | "string"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::format_uci_move;

    #[test]
    fn test_parse_bestmove() {
        let msg = parse_uci_message("bestmove e2e4 ponder e7e5").unwrap();
        match msg {
            UciMessage::BestMove { mv } => {
                assert_eq!(format_uci_move(mv.unwrap()), "e2e4");
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn bestmove_none_ends_search_without_a_move() {
        let msg = parse_uci_message("bestmove (none)").unwrap();
        assert!(matches!(msg, UciMessage::BestMove { mv: None }));
    }

    #[test]
    fn test_parse_info() {
        let msg = parse_uci_message("info depth 12 score cp 35 nodes 15234 pv e2e4 e7e5").unwrap();
        match msg {
            UciMessage::Info(info) => {
                assert_eq!(info.depth, Some(12));
                assert_eq!(info.score, Some(Score::Centipawns(35)));
                assert_eq!(info.pv.len(), 2);
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn mate_score_and_trailing_fields() {
        let msg =
            parse_uci_message("info depth 20 seldepth 4 multipv 1 score mate -2 nodes 900 pv h7h8 a1a8 hashfull 3")
                .unwrap();
        let UciMessage::Info(info) = msg else {
            panic!("Wrong message type");
        };
        assert_eq!(info.depth, Some(20));
        assert_eq!(info.score, Some(Score::Mate(-2)));
        assert_eq!(info.pv.len(), 2);
    }

    #[test]
    fn info_string_carries_no_score() {
        let UciMessage::Info(info) =
            parse_uci_message("info string NNUE evaluation using nn-xyz.nnue").unwrap()
        else {
            panic!("Wrong message type");
        };
        assert!(info.score.is_none());
        assert!(info.pv.is_empty());
    }

    #[test]
    fn unknown_lines_are_errors() {
        assert!(parse_uci_message("Stockfish 16 by the Stockfish developers").is_err());
        assert!(parse_uci_message("").is_err());
    }
}
