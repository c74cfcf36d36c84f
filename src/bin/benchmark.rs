//! Performance benchmark comparing rule strategies and evaluation algorithms

use std::time::Instant;
use cellular_automaton::domain::{Algorithm, LifeLike, Rule, RuleTable, Simulation};

const SEED: u64 = 0x5EED;

fn benchmark(size: usize, iterations: u64, rule: Box<dyn Rule>, algorithm: Algorithm) -> f64 {
    let mut sim = match Simulation::with_seed(size, size, rule, 0.3, SEED) {
        Ok(sim) => sim.with_algorithm(algorithm),
        Err(e) => {
            eprintln!("{}", e);
            return f64::NAN;
        }
    };

    let start = Instant::now();
    sim.run(iterations);
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Cellular Automaton Performance Benchmark ===\n");

    let sizes = [100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "Size", "Table", "Closed", "Table+Par", "Closed+Par", "Speedup"
    );
    println!("{:-<74}", "");

    for size in sizes {
        let table_ms = benchmark(size, iterations, Box::new(RuleTable::standard_life_rule()), Algorithm::Serial);
        let closed_ms = benchmark(size, iterations, Box::new(LifeLike::conway()), Algorithm::Serial);
        let table_par_ms = benchmark(size, iterations, Box::new(RuleTable::standard_life_rule()), Algorithm::Parallel);
        let closed_par_ms = benchmark(size, iterations, Box::new(LifeLike::conway()), Algorithm::Parallel);

        let fastest = table_par_ms.min(closed_par_ms);

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{}x{}", size, size),
            table_ms,
            closed_ms,
            table_par_ms,
            closed_par_ms,
            table_ms / fastest
        );
    }

    println!("\n=== Throughput at 2000x2000 ===\n");

    let cells = 2000 * 2000;
    let par_ms = benchmark(2000, iterations, Box::new(RuleTable::standard_life_rule()), Algorithm::Parallel);
    println!(
        "Table+Parallel: {:.2} ms/gen, {:.1}M cells/sec",
        par_ms,
        (cells as f64) / (par_ms / 1000.0) / 1_000_000.0
    );
}
