//! Fixed-width framing for the goal controller link.
//!
//! Every message on the wire is exactly [`FRAME_SIZE`] bytes:
//!
//! ```text
//! [ASCII head][payload bytes][0x00 padding ...]
//! ```
//!
//! There is no length prefix and no delimiter. The receiver reads 32-byte
//! chunks and strips the trailing NUL padding, so payload bytes must never
//! be 0x00 themselves (color channels remap 0 to 1 for exactly this
//! reason, see [`crate::color`]).

/// Exact on-wire size of every message.
pub const FRAME_SIZE: usize = 32;

/// Padding byte filling the frame after the message content.
pub const PAD_BYTE: u8 = 0x00;

// -- Composition errors --

/// Oversize content is detected here, before any network I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Head plus payload exceed the fixed frame size.
    Oversize { len: usize },
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::Oversize { len } => {
                write!(f, "message is {len} bytes, frame holds {FRAME_SIZE}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

// -- Wire frame --

/// One 32-byte wire frame, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; FRAME_SIZE],
}

impl Frame {
    /// Compose a frame from a message head (the ASCII command text) and raw
    /// payload bytes, padding the remainder with NUL.
    ///
    /// Fails with [`FrameError::Oversize`] when the content would not fit;
    /// callers drop the message without touching the socket.
    pub fn compose(head: &str, payload: &[u8]) -> Result<Self, FrameError> {
        let len = head.len() + payload.len();
        if len > FRAME_SIZE {
            return Err(FrameError::Oversize { len });
        }

        let mut buf = [PAD_BYTE; FRAME_SIZE];
        buf[..head.len()].copy_from_slice(head.as_bytes());
        buf[head.len()..len].copy_from_slice(payload);
        Ok(Self { buf })
    }

    /// Parse a frame received off the wire. Anything but exactly
    /// [`FRAME_SIZE`] bytes is rejected.
    pub fn from_wire(data: &[u8]) -> Option<Self> {
        if data.len() != FRAME_SIZE {
            return None;
        }
        let mut buf = [PAD_BYTE; FRAME_SIZE];
        buf.copy_from_slice(data);
        Some(Self { buf })
    }

    /// The full frame, ready for a single socket write.
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.buf
    }

    /// Frame content with the trailing NUL padding stripped.
    pub fn content(&self) -> &[u8] {
        let end = self
            .buf
            .iter()
            .rposition(|&b| b != PAD_BYTE)
            .map_or(0, |i| i + 1);
        &self.buf[..end]
    }

    /// Split the content at the first `:` into (tag, payload).
    ///
    /// Returns `None` for frames carrying no `:` or a non-ASCII tag; such
    /// frames are not part of the protocol.
    pub fn split(&self) -> Option<(&str, &[u8])> {
        let content = self.content();
        let colon = content.iter().position(|&b| b == b':')?;
        let tag = std::str::from_utf8(&content[..colon]).ok()?;
        Some((tag, &content[colon + 1..]))
    }
}
