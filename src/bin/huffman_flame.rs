use dway::{FrequencyTable, HuffmanBuilder};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let input = (0..100_000u32)
        .map(|i| ((i * i + 7 * i) % 251) as u8)
        .collect::<Vec<_>>();
    let frequencies: FrequencyTable<u8> = input.iter().copied().collect();

    for _ in 0..1000 {
        for d in 2..=6 {
            let codes = HuffmanBuilder::new()
                .with_branching_factor(d)
                .build_codes(&frequencies)
                .unwrap();
            assert!(codes.len() <= 251);
        }
    }
}
