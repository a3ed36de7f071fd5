use core_text::{Buffer, ChangeTracker};

fn type_word(buffer: &mut Buffer, tracker: &mut ChangeTracker, word: &str) {
    tracker.begin_sequence();
    for ch in word.chars() {
        let pos = buffer.length_bytes();
        let before = buffer.cursor();
        let mut tmp = [0u8; 4];
        let s = ch.encode_utf8(&mut tmp);
        buffer.insert(pos, s).unwrap();
        let after = buffer.cursor();
        tracker.record_insert(pos, s.as_bytes().to_vec(), before, after);
    }
    tracker.end_sequence();
}

#[test]
fn multiple_sequences_undo_in_reverse_order() {
    let mut buffer = Buffer::new();
    let mut tracker = ChangeTracker::new(50, 1 << 20);
    tracker.set_auto_sequence(false);

    type_word(&mut buffer, &mut tracker, "git ");
    type_word(&mut buffer, &mut tracker, "commit");
    assert_eq!(buffer.get_complete_content(), "git commit");

    tracker.undo(&mut buffer);
    assert_eq!(buffer.get_complete_content(), "git ");

    tracker.undo(&mut buffer);
    assert_eq!(buffer.get_complete_content(), "");

    tracker.redo(&mut buffer);
    tracker.redo(&mut buffer);
    assert_eq!(buffer.get_complete_content(), "git commit");
}

#[test]
fn undo_with_multibyte_content_restores_exact_bytes() {
    let mut buffer = Buffer::new();
    let mut tracker = ChangeTracker::new(50, 1 << 20);
    tracker.set_auto_sequence(false);

    type_word(&mut buffer, &mut tracker, "echo \u{1f30d} \u{4e2d}\u{6587}");
    let full = buffer.get_complete_content();
    assert!(full.contains('\u{1f30d}'));

    tracker.undo(&mut buffer);
    assert_eq!(buffer.get_complete_content(), "");
    assert!(buffer.full_validate().is_ok());

    tracker.redo(&mut buffer);
    assert_eq!(buffer.get_complete_content(), full);
}
