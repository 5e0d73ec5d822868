use circular::Buffer;
use nom::{IResult, Needed, Offset};
use std::io::{self, Read};
use tracing::{debug, error, trace, warn};

use crate::endianness::ByteOrder;
use crate::error::PcapError;
use crate::linktype::Linktype;
use crate::pcap::{parse_pcap_frame, parse_pcap_header, PcapHeader, PcapRecord};

/// Default initial capacity of the reader buffer
pub const DEFAULT_CAPACITY: usize = 65536;
/// Largest single read request; payloads are pulled in pieces of at most this size
const READ_CHUNK: usize = 65536;

/// State of a [`PcapReader`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReaderState {
    /// Nothing has been read yet
    Unopened,
    /// The global header was read and recognized
    HeaderValidated,
    /// At least one record was returned
    Streaming,
    /// End of stream, or an error occurred. Terminal.
    Exhausted,
}

/// Streaming reader over legacy pcap data
///
/// The reader wraps any source providing the `Read` trait, and never pulls more bytes than
/// needed: 24 bytes for the global header, then for each record 16 bytes of header followed by
/// exactly `caplen` bytes of data. It never seeks and never reads ahead, so the source position
/// is always at a record boundary between two calls.
///
/// The byte order is detected once from the magic number, and used for every following field.
///
/// Errors are explicit:
/// - `PcapError::Eof` means the source ended cleanly at a record boundary,
/// - `PcapError::UnexpectedEof` means a header or payload was cut short,
/// - `PcapError::HeaderNotRecognized` means the source is not a pcap file.
///
/// After any error, the reader is exhausted and all further reads return `PcapError::Eof`
/// without touching the source.
///
/// ## Example
///
/// ```rust
/// use pcap_reader::*;
///
/// # let data: &[u8] = &[0xd4, 0xc3, 0xb2, 0xa1, 2, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0,
/// #                     0xff, 0xff, 0, 0, 1, 0, 0, 0];
/// let mut reader = PcapReader::open(data);
/// let header = reader.validate_header().expect("not a pcap file");
/// println!("link type: {}", header.network);
/// loop {
///     match reader.read_next_packet() {
///         Ok(record) => println!("got {} bytes", record.data.len()),
///         Err(PcapError::Eof) => break,
///         Err(e) => panic!("error while reading: {}", e),
///     }
/// }
/// ```
pub struct PcapReader<R>
where
    R: Read,
{
    reader: R,
    buffer: Buffer,
    max_capacity: Option<usize>,
    header: Option<PcapHeader>,
    state: ReaderState,
    consumed: usize,
}

impl<R> PcapReader<R>
where
    R: Read,
{
    /// Creates a new `PcapReader<R>` with the default buffer capacity.
    ///
    /// No data is read until the header is validated.
    pub fn open(reader: R) -> PcapReader<R> {
        Self::with_capacity(DEFAULT_CAPACITY, reader)
    }

    /// Creates a new `PcapReader<R>` with the provided buffer capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> PcapReader<R> {
        Self::from_buffer(Buffer::with_capacity(capacity), reader)
    }

    /// Creates a new `PcapReader<R>` using the provided `Buffer`.
    pub fn from_buffer(buffer: Buffer, reader: R) -> PcapReader<R> {
        PcapReader {
            reader,
            buffer,
            max_capacity: None,
            header: None,
            state: ReaderState::Unopened,
            consumed: 0,
        }
    }

    /// Set the maximum size the internal buffer can grow to.
    ///
    /// By default there is no limit, and every complete record is returned whatever its size.
    /// With a limit, a record larger than `limit` (header included) returns
    /// `PcapError::BufferTooSmall` and ends the session.
    pub fn max_capacity(mut self, limit: usize) -> Self {
        self.max_capacity = Some(limit);
        self
    }

    /// Read and check the global header.
    ///
    /// Exactly 24 bytes are read from the source. On success, the byte order and link type
    /// are stored for the lifetime of the reader; calling this function again returns the
    /// stored header without reading.
    pub fn validate_header(&mut self) -> Result<&PcapHeader, PcapError> {
        match self.state {
            ReaderState::Unopened => (),
            ReaderState::Exhausted if self.header.is_none() => return Err(PcapError::Eof),
            _ => return self.header.as_ref().ok_or(PcapError::Eof),
        }
        let header = match self.next_item(|data| parse_pcap_header(data)) {
            Ok(header) => header,
            Err(e) => {
                if let PcapError::HeaderNotRecognized(magic) = e {
                    error!("Can't recognize this PCAP file format (magic 0x{:08x}).", magic);
                }
                return Err(e);
            }
        };
        debug!(
            byte_order = %header.byte_order,
            linktype = %header.network,
            snaplen = header.snaplen,
            "pcap header v{}.{}",
            header.version_major,
            header.version_minor
        );
        self.state = ReaderState::HeaderValidated;
        Ok(&*self.header.insert(header))
    }

    /// Read the next record.
    ///
    /// The header is validated first if needed. Returns `PcapError::Eof` when the source has
    /// no more data at a record boundary, and `PcapError::UnexpectedEof` if the source ends
    /// inside a record. A partial record is never returned.
    pub fn read_next_packet(&mut self) -> Result<PcapRecord, PcapError> {
        if self.state == ReaderState::Unopened {
            self.validate_header()?;
        }
        let order = match (&self.header, self.state) {
            (_, ReaderState::Exhausted) | (None, _) => return Err(PcapError::Eof),
            (Some(header), _) => header.byte_order,
        };
        let record = self.next_item(|data| {
            parse_pcap_frame(order, data).map(|(rem, frame)| (rem, frame.to_owned()))
        })?;
        trace!(
            ts_sec = record.ts_sec,
            ts_usec = record.ts_usec,
            caplen = record.caplen,
            origlen = record.origlen,
            "pcap record"
        );
        self.state = ReaderState::Streaming;
        Ok(record)
    }

    /// Lenient lazy sequence of `(byte order, link type, packet data)`.
    ///
    /// The sequence ends silently on end of stream and on a truncated record. If the header
    /// is not recognized, a diagnostic is logged and the sequence is empty. The reader is
    /// consumed: a capture can only be iterated once.
    ///
    /// Every complete record is yielded, unless a limit was set with
    /// [`max_capacity`](Self::max_capacity): then a larger record is logged and ends the sequence.
    pub fn packets(self) -> Packets<R> {
        Packets { reader: self }
    }

    /// Strict iterator over records.
    ///
    /// Ends on `PcapError::Eof`. Any other error is returned once, then the iterator ends.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    /// The global header, if it has been validated
    pub fn header(&self) -> Option<&PcapHeader> {
        self.header.as_ref()
    }

    /// The byte order, if the header has been validated
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.header.as_ref().map(|h| h.byte_order)
    }

    /// The data link type, if the header has been validated
    pub fn linktype(&self) -> Option<Linktype> {
        self.header.as_ref().map(|h| h.network)
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Get the number of consumed bytes
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Run `parse` on buffered data, pulling the exact number of missing bytes from the
    /// source until it succeeds or fails.
    fn next_item<T, F>(&mut self, parse: F) -> Result<T, PcapError>
    where
        F: Fn(&[u8]) -> IResult<&[u8], T, PcapError>,
    {
        loop {
            let data = self.buffer.data();
            match parse(data) {
                Ok((rem, item)) => {
                    let offset = data.offset(rem);
                    self.consume(offset);
                    return Ok(item);
                }
                Err(nom::Err::Incomplete(needed)) => {
                    let count = match needed {
                        Needed::Size(n) => n.get(),
                        Needed::Unknown => 1,
                    };
                    let buffered = self.buffer.available_data();
                    let filled = self.refill(count).map_err(|e| self.exhaust(e))?;
                    if filled < count {
                        let available = buffered + filled;
                        let e = if available == 0 {
                            PcapError::Eof
                        } else {
                            warn!(
                                offset = self.consumed,
                                available, "truncated pcap record, stopping"
                            );
                            PcapError::UnexpectedEof {
                                expected: available + count - filled,
                                available,
                            }
                        };
                        return Err(self.exhaust(e));
                    }
                }
                Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                    return Err(self.exhaust(e));
                }
            }
        }
    }

    fn consume(&mut self, offset: usize) {
        self.consumed += offset;
        self.buffer.consume(offset);
    }

    fn exhaust(&mut self, e: PcapError) -> PcapError {
        self.state = ReaderState::Exhausted;
        e
    }

    /// Read up to `count` bytes from the source into the buffer.
    ///
    /// Returns the number of bytes read, which is lower than `count` only if the source
    /// is exhausted. The buffer grows as data arrives, so a bogus record length does not
    /// allocate more than what the source actually holds.
    fn refill(&mut self, count: usize) -> Result<usize, PcapError> {
        if let Some(limit) = self.max_capacity {
            let needed = self.buffer.available_data() + count;
            if needed > limit {
                return Err(PcapError::BufferTooSmall { needed, limit });
            }
        }
        let mut filled = 0;
        while filled < count {
            let want = (count - filled).min(READ_CHUNK);
            self.reserve(want);
            let space = &mut self.buffer.space()[..want];
            match self.reader.read(space) {
                Ok(0) => break,
                Ok(sz) => {
                    self.buffer.fill(sz);
                    filled += sz;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Make room for `count` more bytes after the buffered data
    fn reserve(&mut self, count: usize) {
        if self.buffer.available_space() < count {
            self.buffer.shift();
            let needed = self.buffer.available_data() + count;
            if needed > self.buffer.capacity() {
                self.buffer.grow(needed);
            }
        }
    }
}

/// Lazy sequence of packets, see [`PcapReader::packets`]
pub struct Packets<R>
where
    R: Read,
{
    reader: PcapReader<R>,
}

impl<R> Packets<R>
where
    R: Read,
{
    /// The underlying reader, for header and state inspection
    pub fn reader(&self) -> &PcapReader<R> {
        &self.reader
    }
}

impl<R> Iterator for Packets<R>
where
    R: Read,
{
    type Item = (ByteOrder, Linktype, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_next_packet() {
            Ok(record) => {
                let header = self.reader.header()?;
                Some((header.byte_order, header.network, record.data))
            }
            Err(PcapError::Eof) | Err(PcapError::UnexpectedEof { .. }) => None,
            Err(PcapError::HeaderNotRecognized(_)) => None,
            Err(e) => {
                warn!(error = %e, "stopping pcap iteration");
                None
            }
        }
    }
}

/// Strict iterator over records, see [`PcapReader::records`]
pub struct Records<'r, R>
where
    R: Read,
{
    reader: &'r mut PcapReader<R>,
}

impl<'r, R> Iterator for Records<'r, R>
where
    R: Read,
{
    type Item = Result<PcapRecord, PcapError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_next_packet() {
            Err(PcapError::Eof) => None,
            r => Some(r),
        }
    }
}
