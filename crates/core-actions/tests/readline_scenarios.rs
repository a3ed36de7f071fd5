//! End-to-end read-line scenarios, driven by raw keystroke bytes through
//! the full byte -> key event -> dispatch -> buffer -> render pipeline,
//! mirroring the engine's literal test scenarios.

use core_actions::{engine, NullHistoryPersistence, ReadLineOutcome};
use core_config::EngineConfig;
use core_input::{FixedByteSource, KeyParser};
use core_terminal::{ColorDepth, Mode, TerminalCapabilities};

fn fake_caps() -> TerminalCapabilities {
    TerminalCapabilities {
        color_depth: ColorDepth::TrueColor,
        cursor_positioning: true,
        mouse: false,
        bracketed_paste: false,
        unicode: true,
        signature: "xterm-256color".to_string(),
    }
}

fn new_engine() -> engine::Engine {
    engine::Engine::new(EngineConfig::default(), fake_caps(), Mode::Native, Box::new(NullHistoryPersistence))
}

fn run(engine: &mut engine::Engine, bytes: &[u8]) -> ReadLineOutcome {
    let mut parser = KeyParser::new(FixedByteSource::new(bytes.to_vec()));
    let mut out = Vec::new();
    engine.read_line("prompt> ", &mut parser, &mut out).unwrap()
}

/// Scenario 1: `e c h o space h i Enter` accepts `"echo hi"`,
/// clears the buffer, and grows history by one.
#[test]
fn basic_insert_and_accept() {
    let mut engine = new_engine();
    let outcome = run(&mut engine, b"echo hi\r");
    assert_eq!(outcome, ReadLineOutcome::Accepted("echo hi".to_string()));
    assert_eq!(engine.buffer().get_complete_content(), "");
    assert_eq!(engine.buffer().length_bytes(), 0);
}

/// Scenario 2: inserting `🌍` after `"hi "` then backspacing
/// once removes all four UTF-8 bytes atomically, leaving the cursor back
/// at codepoint 3 / byte 3.
#[test]
fn emoji_insert_and_backspace_is_atomic() {
    let mut engine = new_engine();
    let mut bytes = b"hi ".to_vec();
    bytes.extend_from_slice("\u{1F30D}".as_bytes()); // 🌍, 4 bytes
    bytes.push(0x7f); // backspace

    let mut parser = KeyParser::new(FixedByteSource::new(bytes));
    let mut out = Vec::new();
    // Drive one event at a time so we can inspect mid-sequence state.
    for _ in 0.."hi ".len() {
        let ev = parser.next_event().unwrap();
        engine.dispatch(ev);
    }
    assert_eq!(engine.buffer().get_complete_content(), "hi ");
    assert_eq!(engine.buffer().cursor().byte, 3);
    assert_eq!(engine.buffer().cursor().codepoint, 3);

    let ev = parser.next_event().unwrap();
    engine.dispatch(ev);
    assert_eq!(engine.buffer().get_complete_content(), "hi \u{1F30D}");
    assert_eq!(engine.buffer().cursor().byte, 7);
    assert_eq!(engine.buffer().cursor().codepoint, 4);

    let ev = parser.next_event().unwrap();
    engine.dispatch(ev);
    assert_eq!(engine.buffer().get_complete_content(), "hi ");
    assert_eq!(engine.buffer().cursor().byte, 3);
    assert_eq!(engine.buffer().cursor().codepoint, 3);
}

/// Scenario 3: typing `a`, `b`, `c` in quick succession groups
/// into one undo sequence; a single `undo` clears the whole run, and
/// `redo` restores it.
#[test]
fn undo_groups_a_typing_run() {
    let mut engine = new_engine();
    let mut parser = KeyParser::new(FixedByteSource::new(b"abc\x1f".to_vec()));
    for _ in 0..4 {
        let ev = parser.next_event().unwrap();
        engine.dispatch(ev);
    }
    assert_eq!(engine.buffer().get_complete_content(), "");

    let ev = core_input::KeyEvent::ctrl('x');
    // Redo via C-x C-r chord.
    let _ = engine.dispatch(ev);
    let _ = engine.dispatch(core_input::KeyEvent::ctrl('r'));
    assert_eq!(engine.buffer().get_complete_content(), "abc");
}

/// Scenario 4: the render pipeline's absolute cursor column
/// tracks both the prompt width and the current cursor codepoint offset.
#[test]
fn arrow_key_cursor_move_updates_emitted_column() {
    let mut engine = new_engine();
    let mut parser = KeyParser::new(FixedByteSource::new(b"echo hello".to_vec()));
    let mut out = Vec::new();
    for _ in 0.."echo hello".len() {
        let ev = parser.next_event().unwrap();
        engine.dispatch(ev);
    }
    engine.render_to("prompt> ", &mut out).unwrap();
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("echo hello"));
    assert_eq!(engine.buffer().cursor().codepoint, 10);

    // Press Left (CSI "ESC [ D").
    let left = core_input::KeyEvent::plain(core_input::KeyCode::ArrowLeft);
    engine.dispatch(left);
    assert_eq!(engine.buffer().cursor().codepoint, 9);

    // Press Home.
    let home = core_input::KeyEvent::plain(core_input::KeyCode::Home);
    engine.dispatch(home);
    assert_eq!(engine.buffer().cursor().codepoint, 0);
}

/// Scenario 5: recalling a multi-line `for` loop preserves its
/// original line structure and re-indentation, and `beginning_of_line`
/// moves within the current logical line, not to the buffer start.
#[test]
fn multiline_for_loop_recall_preserves_structure() {
    let mut engine = new_engine();
    let original = "for file in *.txt; do\necho \"Processing: $file\"\nwc -l \"$file\"\ndone";
    // Accept the multiline command by typing it with embedded newlines via
    // self_insert, then Enter to finalize once the construct is balanced.
    for ch in original.chars() {
        if ch == '\n' {
            engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Enter));
        } else {
            engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Char(ch)));
        }
    }
    let outcome = engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Enter));
    assert!(matches!(outcome, core_actions::Dispatched::Accepted(_)));

    // Recall it back with history-previous.
    engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::ArrowUp));
    let content = engine.buffer().get_complete_content();
    assert_eq!(content.lines().count(), 4);
    assert!(content.lines().nth(1).unwrap().starts_with("  "));

    // Move into line 2 (by backing up from the recalled end-of-buffer
    // cursor with plain backward_char, the same action a user would use)
    // and confirm beginning_of_line stays on that logical line rather than
    // jumping to the buffer start.
    let second_line_start = content.find("echo").unwrap();
    let target_codepoint = second_line_start + 3; // ascii-only prefix, byte == codepoint
    let total_codepoints = content.chars().count();
    for _ in 0..(total_codepoints - target_codepoint) {
        engine.dispatch(core_input::KeyEvent::ctrl('b'));
    }
    assert_eq!(engine.buffer().cursor().byte, target_codepoint);

    engine.dispatch(core_input::KeyEvent::ctrl('a'));
    assert_eq!(engine.buffer().cursor().byte, second_line_start);
}

/// Scenario 6: reverse-i-search with a fuzzy subsequence match.
#[test]
fn reverse_i_search_finds_fuzzy_match() {
    let mut engine = new_engine();
    for cmd in ["git status", "git commit", "grep foo"] {
        run(&mut engine, format!("{cmd}\r").as_bytes());
    }

    engine.dispatch(core_input::KeyEvent::ctrl('r'));
    engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Char('g')));
    engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Char('s')));

    let outcome = engine.dispatch(core_input::KeyEvent::plain(core_input::KeyCode::Enter));
    assert_eq!(outcome, core_actions::Dispatched::Accepted("git status".to_string()));
}
