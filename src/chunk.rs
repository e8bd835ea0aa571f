//! The chunk model: typed payloads flowing through the pipeline.
//!
//! Everything between the socket and the sinks travels as a [`Chunk`]. Raw
//! bytes enter as `Bytes`, get carved up by the protocol filters, and leave
//! as `Text` interleaved with formatting and control chunks. Filters may
//! split, merge, drop, or delay chunks; the only merge the model permits is
//! concatenation of two `Bytes` or two `Text` chunks.

use bitflags::bitflags;

use crate::format::FormatDelta;

/// Socket state transitions surfaced into the chunk stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkState {
    Resolving,
    Connecting,
    Connected,
    Encrypted,
    Disconnecting,
    Disconnected,
    ConnectionRefused,
    HostNotFound,
    Timeout,
    OtherError,
}

/// Edge of an ingress packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketEdge {
    Start,
    End,
}

/// Line-structure separators extracted from the text stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowControlCode {
    Linefeed,
    CarriageReturn,
}

/// Identifier pairing a highlight's opening chunk with its closing chunk.
pub type HighlightId = u32;

/// One item in the pipeline: a tag plus payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Chunk {
    /// A socket state transition.
    Network(NetworkState),
    /// Ingress packet edge; never coalesced, never reordered.
    PacketBoundary(PacketEdge),
    /// Synthetic signal after inter-packet silence; lets filters treat a
    /// trailing partial line as a prompt.
    PromptSweep,
    /// Undecoded octets.
    Bytes(Vec<u8>),
    /// A formatting delta; the empty delta means "reset all".
    Ansi(FormatDelta),
    /// A line separator.
    FlowControl(FlowControlCode),
    /// Decoded text.
    Text(String),
    /// Highlight stack entry: a non-empty delta opens, the empty delta with
    /// the same id closes.
    Highlight(HighlightId, FormatDelta),
}

/// Discriminant-only view of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    Network,
    PacketBoundary,
    PromptSweep,
    Bytes,
    Ansi,
    FlowControl,
    Text,
    Highlight,
}

bitflags! {
    /// Set of chunk tags, used for filter relevance and sink registration.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ChunkMask: u8 {
        const NETWORK         = 0x01;
        const PACKET_BOUNDARY = 0x02;
        const PROMPT_SWEEP    = 0x04;
        const BYTES           = 0x08;
        const ANSI            = 0x10;
        const FLOW_CONTROL    = 0x20;
        const TEXT            = 0x40;
        const HIGHLIGHT       = 0x80;
    }
}

impl From<ChunkTag> for ChunkMask {
    fn from(tag: ChunkTag) -> Self {
        match tag {
            ChunkTag::Network => Self::NETWORK,
            ChunkTag::PacketBoundary => Self::PACKET_BOUNDARY,
            ChunkTag::PromptSweep => Self::PROMPT_SWEEP,
            ChunkTag::Bytes => Self::BYTES,
            ChunkTag::Ansi => Self::ANSI,
            ChunkTag::FlowControl => Self::FLOW_CONTROL,
            ChunkTag::Text => Self::TEXT,
            ChunkTag::Highlight => Self::HIGHLIGHT,
        }
    }
}

impl Chunk {
    /// The chunk's tag.
    #[must_use]
    pub fn tag(&self) -> ChunkTag {
        match self {
            Self::Network(_) => ChunkTag::Network,
            Self::PacketBoundary(_) => ChunkTag::PacketBoundary,
            Self::PromptSweep => ChunkTag::PromptSweep,
            Self::Bytes(_) => ChunkTag::Bytes,
            Self::Ansi(_) => ChunkTag::Ansi,
            Self::FlowControl(_) => ChunkTag::FlowControl,
            Self::Text(_) => ChunkTag::Text,
            Self::Highlight(..) => ChunkTag::Highlight,
        }
    }

    /// Whether this chunk may be concatenated with another of the same tag.
    ///
    /// Only `Bytes` and `Text` carry contiguous buffers; `PacketBoundary` in
    /// particular must never merge.
    #[must_use]
    pub fn is_coalescable(&self) -> bool {
        matches!(self, Self::Bytes(_) | Self::Text(_))
    }

    /// Concatenate `other` onto `self`.
    ///
    /// On a tag mismatch both chunks are handed back unchanged so the caller
    /// can forward them separately.
    pub fn coalesce(self, other: Self) -> std::result::Result<Self, (Self, Self)> {
        match (self, other) {
            (Self::Bytes(mut a), Self::Bytes(b)) => {
                a.extend_from_slice(&b);
                Ok(Self::Bytes(a))
            }
            (Self::Text(mut a), Self::Text(b)) => {
                a.push_str(&b);
                Ok(Self::Text(a))
            }
            (a, b) => Err((a, b)),
        }
    }
}
