//! # PCAP reader
//!
//! This crate reads packet captures stored in the classic libpcap file format, and returns
//! the raw link-layer frames with their metadata. Higher-level protocol decoding is left to
//! the caller.
//!
//! The byte order of the file is detected once from the magic number, and applies to the
//! global header and to every record header. Reading is strictly forward: the reader pulls
//! exactly the bytes of one record at a time from its source, and never seeks.
//!
//! # Example: streaming reader
//!
//! ```rust
//! use pcap_reader::*;
//!
//! # let data: &[u8] = &[
//! #     0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0, 1, 0, 0, 0,
//! #     0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 4, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef,
//! # ];
//! let reader = PcapReader::open(data);
//! let mut num_packets = 0;
//! for (byte_order, linktype, packet) in reader.packets() {
//!     println!("{} {}: {} bytes", byte_order, linktype, packet.len());
//!     num_packets += 1;
//! }
//! assert_eq!(num_packets, 1);
//! ```
//!
//! `packets()` is lenient: a truncated record at the end of the file ends the sequence
//! silently, and a file with an unknown format gives an empty sequence (the failure is logged
//! with `tracing`). Use [`PcapReader::read_next_packet`] or [`PcapReader::records`] to get
//! explicit errors.
//!
//! # Example: in-memory parsing
//!
//! For data already loaded into memory, [`PcapCapture`] parses all records at once without
//! copying data.
//!
//! ```rust
//! use pcap_reader::*;
//!
//! # let data: &[u8] = &[
//! #     0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0, 1, 0, 0, 0,
//! # ];
//! let cap = PcapCapture::from_slice(data).expect("could not parse capture");
//! println!("link type: {}", cap.linktype());
//! for block in cap.iter() {
//!     println!("{} bytes", block.data.len());
//! }
//! ```

mod endianness;
mod error;
mod linktype;
pub use endianness::*;
pub use error::*;
pub use linktype::*;

pub mod pcap;
pub use pcap::*;
