use std::fs;

use pokerroom_engine::cards::parse_cards;
use pokerroom_engine::engine::Engine;
use pokerroom_engine::logger::{ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use pokerroom_engine::player::{BettingAction, Seat};
use pokerroom_engine::round::Phase;

fn sample_record() -> HandRecord {
    HandRecord {
        hand_id: "20250102-000001".to_string(),
        seed: Some(1),
        dealer: "pub-a".to_string(),
        actions: vec![ActionRecord {
            player: "pub-a".to_string(),
            phase: Phase::Preflop,
            action: BettingAction::Call,
            chips: 10,
        }],
        board: parse_cards("AC 7D 2S").unwrap(),
        pot: 40,
        result: Some("Guest A wins 40".to_string()),
        ts: None,
        meta: None,
        showdown: Some(ShowdownInfo {
            winners: vec!["pub-a".to_string()],
            notes: Some("pair".to_string()),
        }),
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::detached("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let rec = sample_record();
    logger.write(&rec).expect("write");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = HandRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: HandRecord = serde_json::from_str(lines[0]).unwrap();
    assert!(first.ts.is_some(), "ts should be injected");
    let second: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.ts, Some(preset));
}

#[test]
fn record_serializes_phases_and_actions_by_name() {
    let json = serde_json::to_value(sample_record()).unwrap();
    assert_eq!(json["actions"][0]["phase"], "PREFLOP");
    assert_eq!(json["actions"][0]["action"], "call");
    assert_eq!(json["board"][0]["suit"], "CLUB");
}

#[test]
fn engine_appends_every_finished_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.jsonl");
    let mut engine = Engine::new(20, Some(5)).with_hand_log(&path).unwrap();
    let a = engine.add_player("pub-a", "sec-a", "Guest A");
    let b = engine.add_player("pub-b", "sec-b", "Guest B");
    engine.sit(a, Seat::One, 500, None).unwrap();
    engine.sit(b, Seat::Two, 500, None).unwrap();

    engine.start_game().unwrap();
    for _ in 0..2 {
        let dealer = engine.round().unwrap().dealer();
        engine.act(dealer, BettingAction::Fold).unwrap();
        if engine.next_round().is_err() {
            break;
        }
    }

    let content = fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].hand_id.ends_with("-000001"));
    assert!(records[1].hand_id.ends_with("-000002"));
    let first = &records[0];
    assert_eq!(first.pot, 30);
    assert_eq!(first.actions.len(), 1);
    assert_eq!(first.actions[0].action, BettingAction::Fold);
    let showdown = first.showdown.as_ref().unwrap();
    assert_eq!(showdown.notes.as_deref(), Some("uncontested"));
    assert_ne!(showdown.winners[0], first.dealer);
}
