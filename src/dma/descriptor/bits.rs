//! Descriptor type field (`die_dt`) encoding.
//!
//! The top nibble selects how the hardware interprets a record; bit 3 enables
//! the descriptor interrupt for it.

/// Raw `die_dt` values
pub mod dt {
    /// Single-frame data
    pub const FSINGLE: u8 = 0x80;
    /// First fragment of a frame
    pub const FSTART: u8 = 0x90;
    /// Middle fragment of a frame
    pub const FMID: u8 = 0xA0;
    /// Last fragment of a frame
    pub const FEND: u8 = 0xB8;
    /// Linear empty (transmit slot awaiting data)
    pub const LEMPTY: u8 = 0xC0;
    /// Extended empty (transmit slot awaiting data, extended record)
    pub const EEMPTY: u8 = 0xD0;
    /// Fixed link to another record
    pub const LINKFIX: u8 = 0x00;
    /// Link to another record
    pub const LINK: u8 = 0xE0;
    /// End of sequence
    pub const EOS: u8 = 0xF0;
    /// Frame empty (receive slot awaiting data)
    pub const FEMPTY: u8 = 0x40;
    /// Frame empty, interrupt on store
    pub const FEMPTY_IS: u8 = 0x10;
    /// Frame empty, interrupt on completion
    pub const FEMPTY_IC: u8 = 0x20;
    /// Frame empty, no data
    pub const FEMPTY_ND: u8 = 0x38;
    /// Frame empty, start fragment
    pub const FEMPTY_START: u8 = 0x50;
    /// Frame empty, middle fragment
    pub const FEMPTY_MID: u8 = 0x60;
    /// Frame empty, end fragment
    pub const FEMPTY_END: u8 = 0x70;

    /// Type nibble
    pub const DT_MASK: u8 = 0xF0;
    /// Descriptor interrupt enable
    pub const DIE: u8 = 0x08;
}

/// Decoded descriptor type (top nibble of `die_dt`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorType {
    /// Fixed link
    LinkFix,
    /// Frame empty, interrupt on store
    FrameEmptyIs,
    /// Frame empty, interrupt on completion
    FrameEmptyIc,
    /// Frame empty, no data
    FrameEmptyNd,
    /// Frame empty
    FrameEmpty,
    /// Frame empty, start fragment
    FrameEmptyStart,
    /// Frame empty, middle fragment
    FrameEmptyMid,
    /// Frame empty, end fragment
    FrameEmptyEnd,
    /// Single frame
    FrameSingle,
    /// Start fragment
    FrameStart,
    /// Middle fragment
    FrameMid,
    /// End fragment
    FrameEnd,
    /// Linear empty
    LinearEmpty,
    /// Extended empty
    ExtendedEmpty,
    /// Link
    Link,
    /// End of sequence
    EndOfSequence,
}

impl DescriptorType {
    /// Decode the type nibble of a raw `die_dt` byte
    pub const fn from_die_dt(die_dt: u8) -> Self {
        match die_dt & dt::DT_MASK {
            0x00 => Self::LinkFix,
            0x10 => Self::FrameEmptyIs,
            0x20 => Self::FrameEmptyIc,
            0x30 => Self::FrameEmptyNd,
            0x40 => Self::FrameEmpty,
            0x50 => Self::FrameEmptyStart,
            0x60 => Self::FrameEmptyMid,
            0x70 => Self::FrameEmptyEnd,
            0x80 => Self::FrameSingle,
            0x90 => Self::FrameStart,
            0xA0 => Self::FrameMid,
            0xB0 => Self::FrameEnd,
            0xC0 => Self::LinearEmpty,
            0xD0 => Self::ExtendedEmpty,
            0xE0 => Self::Link,
            _ => Self::EndOfSequence,
        }
    }

    /// Raw hardware `die_dt` encoding
    pub const fn raw(self) -> u8 {
        match self {
            Self::LinkFix => dt::LINKFIX,
            Self::FrameEmptyIs => dt::FEMPTY_IS,
            Self::FrameEmptyIc => dt::FEMPTY_IC,
            Self::FrameEmptyNd => dt::FEMPTY_ND,
            Self::FrameEmpty => dt::FEMPTY,
            Self::FrameEmptyStart => dt::FEMPTY_START,
            Self::FrameEmptyMid => dt::FEMPTY_MID,
            Self::FrameEmptyEnd => dt::FEMPTY_END,
            Self::FrameSingle => dt::FSINGLE,
            Self::FrameStart => dt::FSTART,
            Self::FrameMid => dt::FMID,
            Self::FrameEnd => dt::FEND,
            Self::LinearEmpty => dt::LEMPTY,
            Self::ExtendedEmpty => dt::EEMPTY,
            Self::Link => dt::LINK,
            Self::EndOfSequence => dt::EOS,
        }
    }

    /// Whether the record points at another record instead of a buffer
    pub const fn is_link(self) -> bool {
        matches!(self, Self::LinkFix | Self::Link)
    }

    /// Whether the record holds (part of) a received or queued frame
    pub const fn carries_frame(self) -> bool {
        matches!(
            self,
            Self::FrameSingle | Self::FrameStart | Self::FrameMid | Self::FrameEnd
        )
    }
}

/// Whether the descriptor interrupt flag is set in `die_dt`
#[inline(always)]
pub const fn interrupt_enabled(die_dt: u8) -> bool {
    die_dt & dt::DIE != 0
}
