use std::io::Write;
use std::time::Duration;

use boardscan::prelude::*;
use vision::mock::MockVisionModel;
use vision::{detect, ImageData};

const START_GRID: &str = r#"[
    ["r","n","b","q","k","b","n","r"],
    ["p","p","p","p","p","p","p","p"],
    [null,null,null,null,null,null,null,null],
    [null,null,null,null,null,null,null,null],
    [null,null,null,null,null,null,null,null],
    [null,null,null,null,null,null,null,null],
    ["P","P","P","P","P","P","P","P"],
    ["R","N","B","Q","K","B","N","R"]
]"#;

/// Shell sitting in the upload view with a photo loaded.
fn shell_with_image() -> Shell {
    let mut shell = Shell::new();
    shell.set_image(ImageData::new(vec![0xff, 0xd8, 0xff], "image/jpeg"));
    shell
}

/// Start a detection and return its request id.
fn start(shell: &mut Shell) -> (u64, ImageData) {
    match shell.start_detection() {
        ShellEffect::StartDetection { request_id, image } => (request_id, image),
        other => panic!("expected StartDetection, got {:?}", other),
    }
}

mod image_loading {
    use super::*;

    #[test]
    fn typed_path_loads_the_photo() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let mut shell = Shell::new();
        shell.open_path_dialog();
        for c in file.path().to_string_lossy().chars() {
            shell.path_push(c);
        }
        assert_eq!(shell.submit_path(), ShellEffect::None);

        assert_eq!(shell.view(), View::Upload);
        assert!(shell.path_input().is_none());
        assert_eq!(shell.image().map(|i| i.mime_type.as_str()), Some("image/png"));
        assert!(shell.image_name().is_some());
    }

    #[test]
    fn unreadable_path_raises_notice_and_stays_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = Shell::new();
        shell.load_image(&dir.path().join("missing.jpg"));
        assert_eq!(shell.view(), View::Home);
        assert!(shell.notice_visible());
        assert!(shell.image().is_none());
    }

    #[test]
    fn empty_path_just_closes_dialog() {
        let mut shell = Shell::new();
        shell.open_path_dialog();
        shell.path_push(' ');
        shell.submit_path();
        assert!(shell.path_input().is_none());
        assert_eq!(shell.view(), View::Home);
        assert!(!shell.notice_visible());
    }
}

mod detection {
    use super::*;

    #[test]
    fn scan_indicator_runs_only_while_scanning() {
        let mut shell = shell_with_image();
        assert_eq!(shell.scan_label(), None);

        start(&mut shell);
        assert_eq!(shell.scan_label().as_deref(), Some("a8"));
        shell.tick_scan();
        shell.tick_scan();
        assert_eq!(shell.scan_label().as_deref(), Some("a6"));
        for _ in 0..6 {
            shell.tick_scan();
        }
        assert_eq!(shell.scan_label().as_deref(), Some("b8"));
    }

    #[test]
    fn second_start_while_scanning_is_ignored() {
        let mut shell = shell_with_image();
        start(&mut shell);
        assert_eq!(shell.start_detection(), ShellEffect::None);
    }

    #[tokio::test]
    async fn successful_scan_reaches_bot_selection() {
        let model = MockVisionModel::new().with_reply(START_GRID);
        let mut shell = shell_with_image();
        let (id, image) = start(&mut shell);

        let result = detect(&model, &image).await;
        shell.finish_detection(id, result);

        assert_eq!(model.calls(), 1);
        assert_eq!(model.last_image(), Some(image));
        assert_eq!(shell.scan_label(), None);
        assert_eq!(
            shell.detected_fen(),
            Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        );
        assert_eq!(shell.view(), View::Upload);

        shell.proceed_to_bots();
        assert_eq!(shell.view(), View::BotSelection);

        match shell.choose_opponent() {
            ShellEffect::StartMatch(setup) => {
                assert_eq!(setup.profile.name, "Sparky");
                assert!(setup.detected_fen.is_some());
            }
            other => panic!("expected StartMatch, got {:?}", other),
        }
        assert_eq!(shell.view(), View::Play);
        assert!(shell.opponent().is_some());
    }

    #[tokio::test]
    async fn no_board_gets_its_own_message() {
        let model = MockVisionModel::new().with_reply(r#"{"error":"NO_BOARD"}"#);
        let mut shell = shell_with_image();
        let (id, image) = start(&mut shell);
        shell.finish_detection(id, detect(&model, &image).await);

        assert_eq!(shell.error(), Some(NO_BOARD_MESSAGE));
        assert_eq!(shell.detection(), &DetectionState::Failed);

        shell.dismiss_notice();
        assert!(!shell.notice_visible());
        assert_eq!(shell.view(), View::Upload);
    }

    #[tokio::test]
    async fn other_failures_share_the_general_message() {
        let model = MockVisionModel::new()
            .with_error("timeout")
            .with_reply("I see a chessboard");
        let mut shell = shell_with_image();

        let (id, image) = start(&mut shell);
        shell.finish_detection(id, detect(&model, &image).await);
        assert_eq!(shell.error(), Some(GENERAL_ERROR_MESSAGE));
        shell.dismiss_notice();

        let (id, image) = start(&mut shell);
        shell.finish_detection(id, detect(&model, &image).await);
        assert_eq!(shell.error(), Some(GENERAL_ERROR_MESSAGE));
        assert_eq!(model.calls(), 2);
    }

    #[test]
    fn unplayable_position_is_a_general_error() {
        let mut shell = shell_with_image();
        let (id, _) = start(&mut shell);
        shell.finish_detection(id, Ok("8/8/8/8/8/8/8/8 w KQkq - 0 1".to_string()));
        assert_eq!(shell.error(), Some(GENERAL_ERROR_MESSAGE));
        assert_eq!(shell.detected_fen(), None);
    }

    #[test]
    fn castling_rights_are_repaired_not_rejected() {
        let mut shell = shell_with_image();
        let (id, _) = start(&mut shell);
        let fen = "4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1".to_string();
        shell.finish_detection(id, Ok(fen.clone()));
        assert!(!shell.notice_visible());
        assert_eq!(shell.detected_fen(), Some(fen.as_str()));
    }

    #[test]
    fn result_after_reset_is_dropped() {
        let mut shell = shell_with_image();
        let (id, _) = start(&mut shell);
        assert_eq!(shell.reset(), ShellEffect::EndMatch);

        shell.finish_detection(id, Err(vision::DetectionError::NoBoardFound));
        assert_eq!(shell.view(), View::Home);
        assert_eq!(shell.detection(), &DetectionState::Idle);
        assert!(!shell.notice_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_while_slow_scan_is_in_flight() {
        let model = MockVisionModel::new()
            .with_reply(START_GRID)
            .with_delay(Duration::from_secs(5));
        let mut shell = shell_with_image();
        let (id, image) = start(&mut shell);

        let worker = model.clone();
        let reply = tokio::spawn(async move { detect(&worker, &image).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!reply.is_finished());
        assert!(shell.is_scanning());
        assert_eq!(model.calls(), 1);

        assert_eq!(shell.reset(), ShellEffect::EndMatch);
        shell.finish_detection(id, reply.await.unwrap());

        assert_eq!(shell.view(), View::Home);
        assert_eq!(shell.detected_fen(), None);
        assert_eq!(shell.detection(), &DetectionState::Idle);
    }

    #[test]
    fn result_for_older_request_is_dropped() {
        let mut shell = shell_with_image();
        let (old, _) = start(&mut shell);
        shell.reset();
        shell.set_image(ImageData::new(vec![1], "image/jpeg"));
        let (new, _) = start(&mut shell);
        assert_ne!(old, new);

        shell.finish_detection(old, Err(vision::DetectionError::NoBoardFound));
        assert!(shell.is_scanning());
        assert!(!shell.notice_visible());
    }
}

mod navigation {
    use super::*;

    #[test]
    fn skip_vision_plays_from_standard_start() {
        let mut shell = Shell::new();
        shell.skip_vision();
        assert_eq!(shell.view(), View::BotSelection);
        match shell.choose_opponent() {
            ShellEffect::StartMatch(setup) => assert_eq!(setup.detected_fen, None),
            other => panic!("expected StartMatch, got {:?}", other),
        }
    }

    #[test]
    fn skip_vision_from_upload_discards_photo() {
        let mut shell = shell_with_image();
        start(&mut shell);
        shell.skip_vision();
        assert_eq!(shell.view(), View::BotSelection);
        assert!(shell.image().is_none());
        assert!(!shell.is_scanning());
    }

    #[test]
    fn proceed_requires_a_detection() {
        let mut shell = shell_with_image();
        shell.proceed_to_bots();
        assert_eq!(shell.view(), View::Upload);
    }

    #[test]
    fn custom_rating_is_clamped() {
        let mut shell = Shell::new();
        assert_eq!(shell.custom_rating(), 1200);
        shell.adjust_custom_rating(1000);
        assert_eq!(shell.custom_rating(), 3200);
        shell.adjust_custom_rating(-1000);
        assert_eq!(shell.custom_rating(), 400);
    }

    #[test]
    fn custom_row_synthesises_profile() {
        let mut shell = Shell::new();
        shell.skip_vision();
        for _ in 0..shell.roster().len() {
            shell.bot_move(1);
        }
        assert!(shell.custom_selected());
        shell.adjust_custom_rating(16);
        match shell.choose_opponent() {
            ShellEffect::StartMatch(setup) => {
                assert_eq!(setup.profile.rating, 2000);
                assert_eq!(setup.profile.skill_level(), 10);
            }
            other => panic!("expected StartMatch, got {:?}", other),
        }
    }

    #[test]
    fn home_menu_wraps_and_quits() {
        let mut shell = Shell::new();
        shell.home_move(-1);
        assert_eq!(HomeItem::ALL[shell.home_cursor()], HomeItem::Quit);
        assert_eq!(shell.home_activate(), ShellEffect::Quit);
        shell.home_move(1);
        shell.home_activate();
        assert_eq!(shell.path_input(), Some(""));
    }

    #[test]
    fn failed_match_returns_to_bot_selection() {
        let mut shell = Shell::new();
        shell.skip_vision();
        shell.choose_opponent();
        shell.match_failed("engine missing");
        assert_eq!(shell.view(), View::BotSelection);
        assert_eq!(shell.error(), Some("engine missing"));
        assert!(shell.opponent().is_none());
    }

    #[test]
    fn reset_clears_everything_downstream() {
        let mut shell = shell_with_image();
        let (id, _) = start(&mut shell);
        shell.finish_detection(id, Ok(chess::STANDARD_START_FEN.to_string()));
        shell.proceed_to_bots();
        shell.bot_move(2);
        shell.choose_opponent();

        shell.reset();
        assert_eq!(shell.view(), View::Home);
        assert!(shell.image().is_none());
        assert!(shell.detected_fen().is_none());
        assert!(shell.error().is_none());
        assert!(shell.opponent().is_none());
        assert_eq!(shell.bot_cursor(), 0);
    }
}
