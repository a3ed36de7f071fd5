//! Render timing instrumentation: tracks the duration of the last
//! completed full render against the latency budget (full-viewport
//! render < 1 ms, prompt-metric walk < 25 µs).

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_RENDER_NS: AtomicU64 = AtomicU64::new(0);

pub fn record_last_render_ns(ns: u64) {
    LAST_RENDER_NS.store(ns, Ordering::Relaxed);
}

pub fn last_render_ns() -> u64 {
    LAST_RENDER_NS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_load_round_trips() {
        record_last_render_ns(1234);
        assert_eq!(last_render_ns(), 1234);
    }
}
