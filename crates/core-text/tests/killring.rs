use core_text::{Buffer, KillAppend, KillRing};

#[test]
fn kill_followed_by_yank_is_the_identity_on_buffer_bytes() {
    let mut buffer = Buffer::from_str("git commit -m wip");
    let mut ring = KillRing::new(32);

    let killed = buffer.delete(11, 6).unwrap();
    let killed = String::from_utf8(killed).unwrap();
    ring.kill(&killed, KillAppend::NewEntry);
    assert_eq!(buffer.get_complete_content(), "git commit ");

    let (text, span) = ring.yank(11).unwrap();
    buffer.insert(span.start, &text).unwrap();

    assert_eq!(buffer.get_complete_content(), "git commit -m wip");
}

#[test]
fn yank_pop_replaces_exactly_the_last_yanked_span() {
    let mut buffer = Buffer::from_str("");
    let mut ring = KillRing::new(32);
    ring.kill("second", KillAppend::NewEntry);
    ring.kill("first", KillAppend::NewEntry);

    let (text, span) = ring.yank(0).unwrap();
    buffer.insert(span.start, &text).unwrap();
    assert_eq!(buffer.get_complete_content(), "first");
    let mut last_span = span;

    let (text, span) = ring.yank_pop().unwrap();
    buffer.delete(last_span.start, last_span.end - last_span.start).unwrap();
    buffer.insert(span.start, &text).unwrap();
    last_span = span;
    let _ = last_span;

    assert_eq!(buffer.get_complete_content(), "second");
}

#[test]
fn yank_pop_on_empty_ring_is_a_documented_no_op() {
    let mut ring = KillRing::new(32);
    assert!(ring.yank(0).is_none());
    assert!(ring.yank_pop().is_none());
}
