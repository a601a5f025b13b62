use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wesplit::{compute, format_currency, SplitConfig, SplitStore};

const WARMUP_OPS: usize = 1_000;
const BENCH_OPS: usize = 100_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match SplitConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!("=== Rust Bill Split Benchmark ===\n");

    bench_compute();
    bench_store_edits(&config);
    bench_format(&config);

    println!("=== Benchmark Complete ===");
}

fn bench_compute() {
    // Warmup
    for i in 0..WARMUP_OPS {
        let _ = std::hint::black_box(compute(i as f64, 1 + (i as u32 % 98), 20));
    }

    let start = Instant::now();
    let mut total = 0.0;
    for i in 0..BENCH_OPS {
        let amount = (i % 10_000) as f64 * 0.37;
        if let Ok(result) = compute(amount, 1 + (i as u32 % 98), (i as u32 % 5) * 5) {
            total += result.per_person;
        }
    }
    let elapsed = start.elapsed();

    // Prevent optimization
    std::hint::black_box(total);

    let ns_per_op = elapsed.as_nanos() as f64 / BENCH_OPS as f64;
    println!("Compute:");
    println!("  Count: {} ops", BENCH_OPS);
    println!("  Mean:  {:.1} ns/op\n", ns_per_op);
}

fn bench_store_edits(config: &SplitConfig) {
    let mut store = SplitStore::new(config.clone());
    let mut renders = 0u64;
    store.subscribe(move |result| {
        renders += 1;
        std::hint::black_box((renders, result.per_person));
    });

    let tips = config.tip_options.clone();
    let start = Instant::now();
    for i in 0..BENCH_OPS {
        store.set_check_amount((i % 10_000) as f64 * 0.37);
        store.set_party_size(i as u32 % 120);
        store.set_tip_percentage(tips[i % tips.len()]);
    }
    let elapsed = start.elapsed();

    let ns_per_op = elapsed.as_nanos() as f64 / (BENCH_OPS * 3) as f64;
    println!("Store Edit + Notify:");
    println!("  Count: {} ops", BENCH_OPS * 3);
    println!("  Mean:  {:.1} ns/op\n", ns_per_op);
}

fn bench_format(config: &SplitConfig) {
    let start = Instant::now();
    let mut len = 0usize;
    for i in 0..BENCH_OPS {
        len += format_currency(i as f64 * 1.01, &config.locale).len();
    }
    let elapsed = start.elapsed();

    std::hint::black_box(len);

    let ns_per_op = elapsed.as_nanos() as f64 / BENCH_OPS as f64;
    println!("Format Currency:");
    println!("  Count: {} ops", BENCH_OPS);
    println!("  Mean:  {:.1} ns/op\n", ns_per_op);
}
