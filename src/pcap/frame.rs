use nom::bytes::streaming::take;
use nom::{IResult, Needed};

use crate::endianness::ByteOrder;
use crate::PcapError;

/// Size of a pcap record header, in bytes
pub const PCAP_RECORD_HEADER_SIZE: usize = 16;

/// Number of timestamp fraction units per second
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Network data of a single pcap record, borrowed from the input
#[derive(Debug, PartialEq, Eq)]
pub struct PcapFrame<'a> {
    pub ts_sec: u32,
    pub ts_usec: u32,
    /// Number of bytes stored in the file (`incl_len`)
    pub caplen: u32,
    /// Length of the packet on the wire (`orig_len`)
    pub origlen: u32,
    pub data: &'a [u8],
}

impl<'a> PcapFrame<'a> {
    /// Total size of the record in the file, header included
    #[inline]
    pub fn record_size(&self) -> usize {
        PCAP_RECORD_HEADER_SIZE + self.data.len()
    }

    pub fn to_owned(&self) -> PcapRecord {
        PcapRecord {
            ts_sec: self.ts_sec,
            ts_usec: self.ts_usec,
            caplen: self.caplen,
            origlen: self.origlen,
            data: self.data.to_vec(),
        }
    }
}

/// Owned pcap record, as returned by [`PcapReader`](crate::PcapReader)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcapRecord {
    /// The date and time when this packet was captured (seconds since epoch)
    pub ts_sec: u32,
    /// The date and time when this packet was captured (microseconds part)
    pub ts_usec: u32,
    /// The number of bytes of packet data actually captured and saved in the file.
    /// This may include padding, and is always the length of `data`.
    pub caplen: u32,
    /// The length of the packet as it appeared on the network when it was captured.
    /// If `caplen` and `origlen` differ, the saved packet was limited by `snaplen`.
    pub origlen: u32,
    /// Link-layer packet data
    pub data: Vec<u8>,
}

impl PcapRecord {
    #[inline]
    pub fn packet_len(&self) -> u32 {
        self.caplen
    }

    #[inline]
    pub fn raw_len(&self) -> u32 {
        self.origlen
    }

    /// The capture timestamp.
    /// Returns the seconds, fractional part value and unit (in number per second)
    pub fn ts(&self) -> (u32, u32, u64) {
        (self.ts_sec, self.ts_usec, MICROS_PER_SEC)
    }

    /// Returns `true` if the packet was cut at capture time
    pub fn is_truncated(&self) -> bool {
        self.origlen > self.caplen
    }
}

impl<'a> From<PcapFrame<'a>> for PcapRecord {
    fn from(frame: PcapFrame<'a>) -> Self {
        frame.to_owned()
    }
}

/// Read a PCAP record header and data
///
/// Each PCAP record starts with a 16-byte header, and is followed by exactly `caplen` bytes
/// of packet data. The packet data format depends on the LinkType.
///
/// If data is missing, `Incomplete` reports exactly how many bytes are needed: first to
/// complete the header, then to complete the payload.
pub fn parse_pcap_frame(order: ByteOrder, i: &[u8]) -> IResult<&[u8], PcapFrame, PcapError> {
    if i.len() < PCAP_RECORD_HEADER_SIZE {
        return Err(nom::Err::Incomplete(Needed::new(
            PCAP_RECORD_HEADER_SIZE - i.len(),
        )));
    }
    let (i, ts_sec) = order.parse_u32(i)?;
    let (i, ts_usec) = order.parse_u32(i)?;
    let (i, caplen) = order.parse_u32(i)?;
    let (i, origlen) = order.parse_u32(i)?;
    let (i, data) = take(caplen as usize)(i)?;
    let frame = PcapFrame {
        ts_sec,
        ts_usec,
        caplen,
        origlen,
        data,
    };
    Ok((i, frame))
}
