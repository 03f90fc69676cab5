#![no_main]
use dway::{create_encoding, DWayHeap, IndexedDWayHeap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, Vec<(bool, i16)>)| {
    let (d, ops) = data;
    let d = (d % 7) as usize + 2; // 2 to 8

    let mut heap = DWayHeap::new(d).unwrap();
    let mut expected = 0usize;
    for &(extract, priority) in &ops {
        if extract {
            let before = heap.peek_with_priority().map(|(&p, _)| p);
            match heap.extract_max_with_priority() {
                Ok((p, _)) => {
                    assert_eq!(Ok(p), before);
                    expected -= 1;
                }
                Err(_) => assert_eq!(expected, 0),
            }
        } else {
            heap.insert(priority, priority);
            expected += 1;
        }
        assert_eq!(heap.len(), expected);
        assert!(heap.is_valid());
    }

    // Same ops on the indexed heap: `true` removes the element keyed by the
    // low byte if present, otherwise it is inserted or reprioritized.
    let mut indexed = IndexedDWayHeap::new(d).unwrap();
    for &(remove, priority) in &ops {
        let key = priority as u8;
        if remove {
            let present = indexed.contains(&key);
            assert_eq!(indexed.remove(&key).is_ok(), present);
            assert!(!indexed.contains(&key));
        } else if indexed.contains(&key) {
            indexed.update_priority(&key, priority).unwrap();
        } else {
            indexed.insert(key, priority).unwrap();
        }
        assert!(indexed.is_valid());
    }

    let symbols: Vec<i16> = ops.iter().map(|&(_, p)| p).collect();
    if let Ok(codes) = create_encoding(symbols.iter().copied(), d) {
        assert!(codes.is_prefix_free());
    } else {
        assert!(symbols.is_empty());
    }
});
