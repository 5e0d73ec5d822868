//! PCAP file format
//!
//! See <https://wiki.wireshark.org/Development/LibpcapFileFormat> for details.
//!
//! A pcap file is a 24-byte global header followed by records. Each record is a 16-byte header
//! and `caplen` bytes of link-layer data. The magic number at the start of the global header
//! gives the byte order of every other field in the file.
//!
//! There are 2 main ways of parsing a PCAP file. The first method is to use
//! [`PcapReader`](struct.PcapReader.html), a streaming reader over any `Read` source that
//! returns owned records.
//!
//! The second method is [`parse_pcap`](fn.parse_pcap.html) or
//! [`PcapCapture`](struct.PcapCapture.html), which require the entire file to be loaded to
//! memory. The building blocks [`parse_pcap_header`](fn.parse_pcap_header.html) and
//! [`parse_pcap_frame`](fn.parse_pcap_frame.html) are streaming nom parsers, and can be used
//! directly.

mod capture;
mod frame;
mod header;
mod reader;

pub use capture::{parse_pcap, PcapCapture};
pub use frame::{
    parse_pcap_frame, PcapFrame, PcapRecord, MICROS_PER_SEC, PCAP_RECORD_HEADER_SIZE,
};
pub use header::{parse_pcap_header, PcapHeader, PCAP_HEADER_SIZE};
pub use reader::{
    Packets, PcapReader, ReaderState, Records, DEFAULT_CAPACITY,
};
