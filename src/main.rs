mod smallint;

use tracing_subscriber::EnvFilter;

use smallint::{RecordSet, SmallIntVector, INLINE_CAPACITY};

// workload
const RECORDS: usize = 1_000_000;
const MAX_RECORD_LEN: usize = 2 * INLINE_CAPACITY;
const SEED: u64 = 0x5eed;

// used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "info";

fn main() {
    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    if let Err(err) = run() {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run() -> smallint::Result<()> {
    println!(
        "Size of small_int_vector = {}",
        std::mem::size_of::<SmallIntVector>()
    );

    // v0..v5, each filled with a prefix of 5, 4, 3, 2, 1
    let mut vectors: Vec<SmallIntVector> = (0..=INLINE_CAPACITY + 1)
        .map(SmallIntVector::new)
        .collect();
    for (capacity, vector) in vectors.iter_mut().enumerate() {
        for (index, value) in (1..=5).rev().take(capacity).enumerate() {
            vector.set(index, value)?;
        }
    }

    for vector in &vectors {
        if vector.is_empty() {
            continue;
        }
        let last = vector.get(vector.len() - 1)?;
        tracing::debug!("{:?}, last={}", vector, last);
        println!("{}", vector);
    }

    let records = RecordSet::generate(RECORDS, MAX_RECORD_LEN, SEED)?;
    let stats = records.stats();
    tracing::info!("{}", stats);
    if !records.is_empty() {
        tracing::info!(
            "Sum of all elements: {} ({} bytes per record)",
            records.total(),
            stats.footprint_bytes / records.len()
        );
    }

    Ok(())
}
