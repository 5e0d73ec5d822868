use nom::combinator::complete;
use nom::multi::many0;
use nom::{IResult, Needed};
use std::fmt;

use crate::error::PcapError;
use crate::linktype::Linktype;
use crate::pcap::{parse_pcap_frame, parse_pcap_header, PcapFrame, PcapHeader};

/// In-memory pcap capture
///
/// All records are parsed when the capture is created, and borrow the input slice. Use
/// [`PcapReader`](crate::PcapReader) for large files or unbounded sources.
///
/// Like the streaming reader, a partial record at the end of the input is ignored.
pub struct PcapCapture<'a> {
    pub header: PcapHeader,

    pub blocks: Vec<PcapFrame<'a>>,
}

impl<'a> PcapCapture<'a> {
    pub fn from_slice(i: &[u8]) -> Result<PcapCapture, PcapError> {
        match parse_pcap(i) {
            Ok((_, pcap)) => Ok(pcap),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
            Err(nom::Err::Incomplete(Needed::Size(n))) => Err(PcapError::UnexpectedEof {
                expected: i.len() + n.get(),
                available: i.len(),
            }),
            Err(nom::Err::Incomplete(Needed::Unknown)) => Err(PcapError::UnexpectedEof {
                expected: i.len() + 1,
                available: i.len(),
            }),
        }
    }

    pub fn linktype(&self) -> Linktype {
        self.header.network
    }

    pub fn snaplen(&self) -> u32 {
        self.header.snaplen
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PcapFrame<'a>> {
        self.blocks.iter()
    }
}

impl<'a> fmt::Debug for PcapCapture<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.debug_struct("PcapCapture")
            .field("header", &self.header)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}

impl<'a, 'c> IntoIterator for &'c PcapCapture<'a> {
    type Item = &'c PcapFrame<'a>;
    type IntoIter = std::slice::Iter<'c, PcapFrame<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Parse the entire file
///
/// Note: this requires the file to be fully loaded to memory.
pub fn parse_pcap(i: &[u8]) -> IResult<&[u8], PcapCapture, PcapError> {
    let (i, header) = parse_pcap_header(i)?;
    let order = header.byte_order;
    let (i, blocks) = many0(complete(|i| parse_pcap_frame(order, i)))(i)?;
    Ok((i, PcapCapture { header, blocks }))
}
