//! Raw byte sourcing, decoupled from the parsing state machine in
//! `parser.rs` so the parser can be driven deterministically in tests
//! without a real terminal.
//!
//! The real terminal is expected to already be in raw mode (canonical mode,
//! echo, ISIG, IXON and CRNL translation all off — see `core-terminal`).
//! [`TtyByteSource::read_byte`] then performs a genuinely blocking single-byte
//! read, and [`TtyByteSource::read_byte_timeout`] polls the same descriptor
//! with a bounded wait, which is the userspace equivalent of a
//! VMIN=1/VTIME=1 termios setting (blocking first byte, 100 ms inter-byte
//! timeout) without requiring a second termios configuration pass.

use std::os::fd::RawFd;
use std::time::Duration;

use crate::error::{InputError, InputResult};

pub trait ByteSource {
    /// Blocks until exactly one byte is available, or the stream ends.
    fn read_byte(&mut self) -> InputResult<u8>;

    /// Waits up to `timeout` for a byte. Returns `Err(InputError::Timeout)`
    /// if none arrives in time.
    fn read_byte_timeout(&mut self, timeout: Duration) -> InputResult<u8>;
}

/// Reads raw bytes from a file descriptor (stdin, by convention fd 0).
pub struct TtyByteSource {
    fd: RawFd,
}

impl TtyByteSource {
    pub fn stdin() -> Self {
        Self { fd: 0 }
    }

    pub fn from_fd(fd: RawFd) -> Self {
        Self { fd }
    }

    fn poll_readable(&self, timeout: Duration) -> InputResult<bool> {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        loop {
            let millis = timeout.as_millis().min(i32::MAX as u128) as i32;
            // SAFETY: `pfd` is a valid, uniquely-owned pollfd for the
            // duration of this call, and we pass a length of 1.
            let rc = unsafe { libc::poll(&mut pfd, 1, millis) };
            if rc < 0 {
                let err = std::io::Error::last_os_error();
                if err.kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(InputError::Io(err));
            }
            return Ok(rc > 0);
        }
    }
}

impl ByteSource for TtyByteSource {
    fn read_byte(&mut self) -> InputResult<u8> {
        let mut buf = [0u8; 1];
        loop {
            // SAFETY: `buf` is a valid 1-byte buffer for the duration of the
            // call; `self.fd` is a descriptor the caller guarantees stays
            // open for the lifetime of this `TtyByteSource`.
            let rc = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast(), 1) };
            match rc {
                0 => return Err(InputError::EndOfStream),
                1 => return Ok(buf[0]),
                _ => {
                    let err = std::io::Error::last_os_error();
                    if err.kind() == std::io::ErrorKind::Interrupted {
                        continue;
                    }
                    return Err(InputError::Io(err));
                }
            }
        }
    }

    fn read_byte_timeout(&mut self, timeout: Duration) -> InputResult<u8> {
        if self.poll_readable(timeout)? {
            self.read_byte()
        } else {
            Err(InputError::Timeout)
        }
    }
}

/// A fixed in-memory byte sequence, for driving the parser deterministically
/// in tests. `read_byte_timeout` never actually waits.
#[derive(Debug, Default)]
pub struct FixedByteSource {
    bytes: std::collections::VecDeque<u8>,
}

impl FixedByteSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into().into(),
        }
    }
}

impl ByteSource for FixedByteSource {
    fn read_byte(&mut self) -> InputResult<u8> {
        self.bytes.pop_front().ok_or(InputError::EndOfStream)
    }

    fn read_byte_timeout(&mut self, _timeout: Duration) -> InputResult<u8> {
        self.bytes.pop_front().ok_or(InputError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_yields_bytes_in_order() {
        let mut src = FixedByteSource::new(b"ab".to_vec());
        assert_eq!(src.read_byte().unwrap(), b'a');
        assert_eq!(src.read_byte().unwrap(), b'b');
        assert!(matches!(src.read_byte(), Err(InputError::EndOfStream)));
    }

    #[test]
    fn fixed_source_times_out_when_empty_via_timeout_call() {
        let mut src = FixedByteSource::new(Vec::new());
        assert!(matches!(
            src.read_byte_timeout(Duration::from_millis(1)),
            Err(InputError::Timeout)
        ));
    }
}
