//! Runtime terminal probing for terminals the environment-signature
//! classification in `capabilities.rs` can't identify ("for
//! unknown terminals, optional runtime probing — send a harmless query,
//! poll stdin for the response with a 25-100 ms timeout").
//!
//! Every probe opens its own [`RawModeGuard`] so termios is saved and
//! restored around the probe regardless of which path it exits through —
//! response received, timeout, or write failure.

use std::os::fd::RawFd;
use std::time::Duration;

use crate::error::{TerminalError, TerminalResult};
use crate::raw::RawModeGuard;

/// Default probe timeout window (25-100 ms is the usable range for a
/// terminal that actually answers); picked at the midpoint.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(60);

/// Sends `query` to `fd_out` and collects bytes from `fd_in` until
/// `is_terminator` returns true for the last byte read or `timeout`
/// elapses. Returns `Ok(None)` on timeout (not an error: an unresponsive
/// terminal just means probing is inconclusive, a recoverable outcome).
pub fn probe(
    fd_in: RawFd,
    fd_out: RawFd,
    query: &[u8],
    timeout: Duration,
    is_terminator: impl Fn(u8) -> bool,
) -> TerminalResult<Option<Vec<u8>>> {
    let _guard = RawModeGuard::enable(fd_in)?;
    write_all(fd_out, query)?;

    let deadline = std::time::Instant::now() + timeout;
    let mut out = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }
        match read_one_with_timeout(fd_in, remaining)? {
            Some(byte) => {
                out.push(byte);
                if is_terminator(byte) {
                    return Ok(Some(out));
                }
            }
            None => return Ok(None),
        }
    }
    // guard drops here on every path above, restoring termios.
}

/// Probes with the DEC "report cursor position" query (`ESC[6n`), whose
/// response `ESC[row;colR` terminates in `R`. A terminal that answers is
/// almost certainly capable of absolute cursor positioning.
pub fn probe_cursor_position_support(fd_in: RawFd, fd_out: RawFd) -> TerminalResult<bool> {
    let response = probe(fd_in, fd_out, b"\x1b[6n", DEFAULT_PROBE_TIMEOUT, |b| b == b'R')?;
    Ok(response.is_some())
}

fn write_all(fd: RawFd, buf: &[u8]) -> TerminalResult<()> {
    let mut written = 0;
    while written < buf.len() {
        // SAFETY: `buf[written..]` is a valid slice for the duration of the
        // call; `fd` is caller-owned and open.
        let rc = unsafe {
            libc::write(
                fd,
                buf[written..].as_ptr().cast(),
                buf.len() - written,
            )
        };
        if rc < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(TerminalError::SizeQuery(err));
        }
        written += rc as usize;
    }
    Ok(())
}

fn read_one_with_timeout(fd: RawFd, timeout: Duration) -> TerminalResult<Option<u8>> {
    let mut pfd = libc::pollfd { fd, events: libc::POLLIN, revents: 0 };
    let millis = timeout.as_millis().min(i32::MAX as u128) as i32;
    // SAFETY: `pfd` is valid and uniquely borrowed for this call.
    let rc = unsafe { libc::poll(&mut pfd, 1, millis) };
    if rc < 0 {
        return Err(TerminalError::SizeQuery(std::io::Error::last_os_error()));
    }
    if rc == 0 {
        return Ok(None);
    }
    let mut buf = [0u8; 1];
    // SAFETY: `buf` is a valid 1-byte buffer for the call.
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), 1) };
    if n <= 0 {
        return Ok(None);
    }
    Ok(Some(buf[0]))
}
