//! `PlaySession` against a scripted engine that logs what it receives.

#![cfg(unix)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use boardscan::prelude::*;

const SCRIPT: &str = r#"#!/bin/sh
log="$(dirname "$0")/received.log"
while read -r line; do
  echo "$line" >> "$log"
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    "go "*) echo "info depth 3 score cp 12 pv e2e4"; echo "bestmove e2e4" ;;
    quit) exit 0 ;;
  esac
done
"#;

fn fake_engine(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("fake-engine");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();
        file.sync_all().unwrap();
    }
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn received(dir: &tempfile::TempDir) -> Vec<String> {
    std::fs::read_to_string(dir.path().join("received.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Poll the log until the engine has seen a `go`.
async fn received_through_go(dir: &tempfile::TempDir) -> Vec<String> {
    for _ in 0..100 {
        let lines = received(dir);
        if lines.iter().any(|l| l.starts_with("go ")) {
            return lines;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("engine never received go: {:?}", received(dir));
}

#[tokio::test]
async fn custom_rating_sets_skill_level_before_first_search() {
    let dir = tempfile::tempdir().unwrap();
    let setup = MatchSetup {
        profile: OpponentProfile::custom(2000),
        detected_fen: None,
    };

    let session = PlaySession::start(setup, Some(fake_engine(&dir)))
        .await
        .unwrap();
    assert!(session.controller.engine_online());

    let lines = received_through_go(&dir).await;
    assert_eq!(lines[0], "uci");
    assert_eq!(lines[1], "setoption name Skill Level value 10");
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("setoption")).count(),
        1
    );
    let go = lines.iter().position(|l| l.starts_with("go ")).unwrap();
    assert_eq!(lines[go], "go depth 12");
    assert!(lines[..go].iter().any(|l| l.starts_with("position fen ")));

    session.shutdown().await;
}

#[tokio::test]
async fn missing_engine_leaves_match_playable() {
    let setup = MatchSetup {
        profile: OpponentProfile::custom(1200),
        detected_fen: None,
    };
    let session = PlaySession::start(setup, Some(PathBuf::from("/definitely/not/here/stockfish")))
        .await
        .unwrap();

    assert!(!session.controller.engine_online());
    assert_eq!(session.controller.phase(), MatchPhase::PlayerToMove);
    assert!(session
        .controller
        .status_message()
        .unwrap()
        .starts_with("Engine unavailable"));
}
