#![allow(dead_code)]

use pcap_reader::ByteOrder;

/// A record to write into a synthetic capture
#[derive(Clone, Debug)]
pub struct Rec {
    pub ts_sec: u32,
    pub ts_usec: u32,
    pub origlen: u32,
    pub data: Vec<u8>,
}

fn put_u16(v: &mut Vec<u8>, order: ByteOrder, x: u16) {
    match order {
        ByteOrder::LittleEndian => v.extend_from_slice(&x.to_le_bytes()),
        ByteOrder::BigEndian => v.extend_from_slice(&x.to_be_bytes()),
    }
}

fn put_u32(v: &mut Vec<u8>, order: ByteOrder, x: u32) {
    match order {
        ByteOrder::LittleEndian => v.extend_from_slice(&x.to_le_bytes()),
        ByteOrder::BigEndian => v.extend_from_slice(&x.to_be_bytes()),
    }
}

/// Global header with the given byte order and link type
pub fn global_header(order: ByteOrder, linktype: u32) -> Vec<u8> {
    let mut v = Vec::with_capacity(24);
    // the magic number is always read as little-endian
    let magic = match order {
        ByteOrder::LittleEndian => 0xa1b2_c3d4u32,
        ByteOrder::BigEndian => 0x4d3c_2b1a,
    };
    v.extend_from_slice(&magic.to_le_bytes());
    put_u16(&mut v, order, 2);
    put_u16(&mut v, order, 4);
    put_u32(&mut v, order, 0);
    put_u32(&mut v, order, 0);
    put_u32(&mut v, order, 65535);
    put_u32(&mut v, order, linktype);
    v
}

pub fn record(order: ByteOrder, rec: &Rec) -> Vec<u8> {
    let mut v = Vec::with_capacity(16 + rec.data.len());
    put_u32(&mut v, order, rec.ts_sec);
    put_u32(&mut v, order, rec.ts_usec);
    put_u32(&mut v, order, rec.data.len() as u32);
    put_u32(&mut v, order, rec.origlen);
    v.extend_from_slice(&rec.data);
    v
}

pub fn capture(order: ByteOrder, linktype: u32, recs: &[Rec]) -> Vec<u8> {
    let mut v = global_header(order, linktype);
    for rec in recs {
        v.extend(record(order, rec));
    }
    v
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
