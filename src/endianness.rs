use nom::error::ParseError;
use nom::number::streaming::{be_i32, be_u16, be_u32, le_i32, le_u16, le_u32};
use nom::IResult;
use std::fmt;

/// Magic number of a little-endian capture, as read from the first 4 bytes (`D4 C3 B2 A1`)
pub const PCAP_MAGIC_LE: u32 = 0xa1b2_c3d4;
/// Magic number of a big-endian capture, as read from the first 4 bytes (`1A 2B 3C 4D`)
pub const PCAP_MAGIC_BE: u32 = 0x4d3c_2b1a;

/// Byte ordering of every multi-byte field following the magic number
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Detect byte ordering from a magic number read as little-endian.
    ///
    /// Returns `None` if the value is not a known pcap magic number.
    pub fn from_magic(magic: u32) -> Option<ByteOrder> {
        match magic {
            PCAP_MAGIC_LE => Some(ByteOrder::LittleEndian),
            PCAP_MAGIC_BE => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    #[inline]
    pub fn is_bigendian(self) -> bool {
        self == ByteOrder::BigEndian
    }

    #[inline]
    pub(crate) fn parse_u16<'a, E: ParseError<&'a [u8]>>(
        self,
        i: &'a [u8],
    ) -> IResult<&'a [u8], u16, E> {
        match self {
            ByteOrder::LittleEndian => le_u16(i),
            ByteOrder::BigEndian => be_u16(i),
        }
    }

    #[inline]
    pub(crate) fn parse_u32<'a, E: ParseError<&'a [u8]>>(
        self,
        i: &'a [u8],
    ) -> IResult<&'a [u8], u32, E> {
        match self {
            ByteOrder::LittleEndian => le_u32(i),
            ByteOrder::BigEndian => be_u32(i),
        }
    }

    #[inline]
    pub(crate) fn parse_i32<'a, E: ParseError<&'a [u8]>>(
        self,
        i: &'a [u8],
    ) -> IResult<&'a [u8], i32, E> {
        match self {
            ByteOrder::LittleEndian => le_i32(i),
            ByteOrder::BigEndian => be_i32(i),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ByteOrder::LittleEndian => f.write_str("little-endian"),
            ByteOrder::BigEndian => f.write_str("big-endian"),
        }
    }
}
