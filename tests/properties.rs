mod common;

use common::{capture, global_header, record, Rec};
use pcap_reader::*;
use proptest::prelude::*;

fn arb_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::LittleEndian), Just(ByteOrder::BigEndian)]
}

fn arb_rec() -> impl Strategy<Value = Rec> {
    (
        any::<u32>(),
        0u32..1_000_000,
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..200),
    )
        .prop_map(|(ts_sec, ts_usec, origlen, data)| Rec {
            ts_sec,
            ts_usec,
            origlen,
            data,
        })
}

proptest! {
    #[test]
    fn all_complete_records_are_yielded(
        order in arb_order(),
        linktype in any::<u32>(),
        recs in prop::collection::vec(arb_rec(), 0..20),
    ) {
        let data = capture(order, linktype, &recs);
        let mut reader = PcapReader::open(&data[..]);
        let header = reader.validate_header().expect("header").clone();
        prop_assert_eq!(header.byte_order, order);
        prop_assert_eq!(header.network, Linktype(linktype));
        let mut got = Vec::new();
        loop {
            match reader.read_next_packet() {
                Ok(r) => got.push(r),
                Err(PcapError::Eof) => break,
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error {}", e))),
            }
        }
        prop_assert_eq!(got.len(), recs.len());
        for (g, r) in got.iter().zip(&recs) {
            prop_assert_eq!(g.ts_sec, r.ts_sec);
            prop_assert_eq!(g.ts_usec, r.ts_usec);
            prop_assert_eq!(g.origlen, r.origlen);
            prop_assert_eq!(&g.data, &r.data);
        }
    }

    #[test]
    fn truncated_input_yields_only_complete_records(
        order in arb_order(),
        recs in prop::collection::vec(arb_rec(), 1..10),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut data = global_header(order, 1);
        let mut ends = Vec::new();
        for r in &recs {
            data.extend(record(order, r));
            ends.push(data.len());
        }
        let len = cut.index(data.len() + 1);
        let complete = ends.iter().filter(|&&end| end <= len).count();
        let packets: Vec<_> = PcapReader::open(&data[..len]).packets().collect();
        if len < 24 {
            prop_assert!(packets.is_empty());
        } else {
            prop_assert_eq!(packets.len(), complete);
            for (p, r) in packets.iter().zip(&recs) {
                prop_assert_eq!(p.0, order);
                prop_assert_eq!(&p.2, &r.data);
            }
        }
    }

    #[test]
    fn unknown_magic_yields_nothing(
        magic in any::<u32>().prop_filter("known magic", |&m| m != 0xa1b2_c3d4 && m != 0x4d3c_2b1a),
        recs in prop::collection::vec(arb_rec(), 0..5),
    ) {
        let mut data = capture(ByteOrder::LittleEndian, 1, &recs);
        data[..4].copy_from_slice(&magic.to_le_bytes());
        let mut reader = PcapReader::open(&data[..]);
        prop_assert_eq!(
            reader.validate_header().map(|_| ()),
            Err(PcapError::HeaderNotRecognized(magic))
        );
        prop_assert_eq!(PcapReader::open(&data[..]).packets().count(), 0);
    }
}
