use nom::number::streaming::le_u32;
use nom::{IResult, Needed};

use crate::endianness::{ByteOrder, PCAP_MAGIC_LE};
use crate::linktype::Linktype;
use crate::PcapError;

/// Size of the pcap global header, in bytes
pub const PCAP_HEADER_SIZE: usize = 24;

/// PCAP global header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcapHeader {
    /// File format and byte ordering, read as a little-endian integer. `0xa1b2c3d4` means the
    /// rest of the file is little-endian, `0x4d3c2b1a` means big-endian.
    pub magic_number: u32,
    /// Version major number (currently 2)
    pub version_major: u16,
    /// Version minor number (currently 4)
    pub version_minor: u16,
    /// The correction time in seconds between GMT (UTC) and the local timezone of the following packet header timestamps
    pub thiszone: i32,
    /// In theory, the accuracy of time stamps in the capture; in practice, all tools set it to 0
    pub sigfigs: u32,
    /// max len of captured packets, in octets
    pub snaplen: u32,
    /// Data link type
    pub network: Linktype,
    /// Byte ordering derived from `magic_number`
    pub byte_order: ByteOrder,
}

impl PcapHeader {
    pub fn new() -> PcapHeader {
        PcapHeader {
            magic_number: PCAP_MAGIC_LE,
            version_major: 2,
            version_minor: 4,
            thiszone: 0,
            sigfigs: 0,
            snaplen: 0,
            network: Linktype::ETHERNET,
            byte_order: ByteOrder::LittleEndian,
        }
    }

    pub const fn size(&self) -> usize {
        PCAP_HEADER_SIZE
    }

    pub fn is_bigendian(&self) -> bool {
        self.byte_order.is_bigendian()
    }
}

impl Default for PcapHeader {
    fn default() -> Self {
        PcapHeader::new()
    }
}

/// Read the PCAP global header
///
/// All 24 bytes must be present before the magic number is checked. The magic number
/// selects the byte order used for the remaining fields.
pub fn parse_pcap_header(i: &[u8]) -> IResult<&[u8], PcapHeader, PcapError> {
    if i.len() < PCAP_HEADER_SIZE {
        return Err(nom::Err::Incomplete(Needed::new(PCAP_HEADER_SIZE - i.len())));
    }
    let (i, magic_number) = le_u32(i)?;
    let byte_order = match ByteOrder::from_magic(magic_number) {
        Some(order) => order,
        None => return Err(nom::Err::Error(PcapError::HeaderNotRecognized(magic_number))),
    };
    let (i, version_major) = byte_order.parse_u16(i)?;
    let (i, version_minor) = byte_order.parse_u16(i)?;
    let (i, thiszone) = byte_order.parse_i32(i)?;
    let (i, sigfigs) = byte_order.parse_u32(i)?;
    let (i, snaplen) = byte_order.parse_u32(i)?;
    let (i, network) = byte_order.parse_u32(i)?;
    let header = PcapHeader {
        magic_number,
        version_major,
        version_minor,
        thiszone,
        sigfigs,
        snaplen,
        network: Linktype(network),
        byte_order,
    };
    Ok((i, header))
}
