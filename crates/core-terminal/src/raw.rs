//! Raw-mode termios control.
//!
//! Canonical mode off, echo off, ISIG off, IXON off, CRNL translation
//! off, `VMIN=1, VTIME=1` — block for the first byte, then a 100 ms
//! inter-byte timeout. This single setting is what makes the
//! escape-sequence parser's timeout-based ESC-vs-CSI disambiguation work at
//! the OS level; `core-input`'s `TtyByteSource` layers its own `poll`-based
//! timeout on top for the same effect without a second termios pass.
//!
//! Termios is the one piece of globally shared mutable state in the
//! engine. [`RawModeGuard`] saves the original termios on construction
//! and restores it on every exit path — normal drop, early return via `?`,
//! or panic unwinding — by relying on `Drop`.

use std::os::fd::RawFd;

use tracing::{info, warn};

use crate::error::{TerminalError, TerminalResult};

/// RAII guard: while alive, `fd` (conventionally stdin, fd 0) is in raw
/// mode. Dropping it restores the termios state captured at construction.
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
    restored: bool,
}

impl RawModeGuard {
    /// Saves the current termios for `fd` and switches it to raw mode.
    pub fn enable(fd: RawFd) -> TerminalResult<Self> {
        let original = get_termios(fd)?;
        let mut raw = original;
        // ECHO: don't echo typed bytes (the renderer owns all output).
        // ICANON: disable line buffering so every byte is delivered as typed.
        // ISIG: don't let the tty driver turn C-c/C-z into signals; the
        // engine surfaces them as `Interrupt`/`Suspend` actions itself.
        // IXON: disable software flow control so C-s/C-q reach the parser
        // (they're bound to forward-search-history / quoted-insert).
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 1; // deciseconds: 100ms inter-byte timeout
        set_termios(fd, &raw)?;
        info!(target: "terminal.raw", fd, "raw mode enabled");
        Ok(Self { fd, original, restored: false })
    }

    /// Restores the original termios early (idempotent). `Drop` calls this
    /// too, so callers don't need to invoke it unless they want restoration
    /// to happen before the guard's scope ends.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        match set_termios(self.fd, &self.original) {
            Ok(()) => info!(target: "terminal.raw", fd = self.fd, "termios restored"),
            Err(e) => warn!(target: "terminal.raw", fd = self.fd, error = %e, "failed to restore termios"),
        }
        self.restored = true;
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn get_termios(fd: RawFd) -> TerminalResult<libc::termios> {
    // SAFETY: `termios` is a plain-old-data struct; `tcgetattr` fully
    // initializes it when it returns 0.
    unsafe {
        let mut t: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut t) != 0 {
            return Err(TerminalError::Termios(std::io::Error::last_os_error()));
        }
        Ok(t)
    }
}

fn set_termios(fd: RawFd, t: &libc::termios) -> TerminalResult<()> {
    // SAFETY: `t` is a valid, fully-initialized termios for the duration of
    // the call. TCSANOW applies the change immediately.
    unsafe {
        if libc::tcsetattr(fd, libc::TCSANOW, t) != 0 {
            return Err(TerminalError::Termios(std::io::Error::last_os_error()));
        }
    }
    Ok(())
}

// Raw-mode enable/restore needs a real tty and doesn't run meaningfully
// under a test harness, where stdin is typically a pipe; exercised instead
// by the bin crate's interactive path.
