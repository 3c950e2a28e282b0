//! Spectral prefetch engine CLI.
//!
//! This binary drives the prefetch engine against a workload and prints the
//! final report. It performs:
//! 1. **Trace replay:** Feed a text access trace (one access per line) through
//!    the engine.
//! 2. **Synthetic runs:** Generate stride, alternating, periodic, or random
//!    access streams and drive them through the engine.
//! 3. **Host modelling:** A fixed-depth prefetch queue stands in for the host
//!    cache's occupancy probe.

use clap::{Parser, Subcommand};
use std::{fs, process};

use specfetch_core::{CacheHost, EngineConfig, Prefetcher, SpectralPrefetcher};

#[derive(Parser, Debug)]
#[command(
    name = "specfetch",
    author,
    version,
    about = "Spectral cache-prefetch engine driver",
    long_about = "Replay an access trace or generate a synthetic workload, run it through the\nspectral prefetch engine, and print the final statistics report.\n\nTrace format: one access per line, `<ip-hex> <addr-hex> <h|m>`. Blank lines\nand `#` comments are skipped.\n\nExamples:\n  specfetch run traces/mcf.txt\n  specfetch run traces/mcf.txt --config engine.json --queue-depth 8\n  specfetch synth --pattern alternating --accesses 50000\n  specfetch synth --pattern random --streams 16 --seed 7 --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a text access trace through the engine.
    Run {
        /// Trace file: one access per line, `<ip-hex> <addr-hex> <h|m>`.
        trace: String,

        /// Engine configuration file (JSON; missing fields take defaults).
        #[arg(short, long)]
        config: Option<String>,

        /// Depth of the modelled host prefetch queue.
        #[arg(long, default_value_t = 16)]
        queue_depth: usize,

        /// Log engine events (locks, switches, resets, issued requests).
        #[arg(long = "trace")]
        trace_events: bool,
    },

    /// Generate a synthetic workload and drive it through the engine.
    Synth {
        /// Access pattern: stride, alternating, periodic6, or random.
        #[arg(long, default_value = "stride")]
        pattern: String,

        /// Number of accesses to generate.
        #[arg(long, default_value_t = 20_000)]
        accesses: u64,

        /// Number of interleaved instruction-pointer streams.
        #[arg(long, default_value_t = 4)]
        streams: u64,

        /// Seed for the pseudo-random generator.
        #[arg(long, default_value_t = 0x2545_F491_4F6C_DD1D)]
        seed: u64,

        /// Engine configuration file (JSON; missing fields take defaults).
        #[arg(short, long)]
        config: Option<String>,

        /// Depth of the modelled host prefetch queue.
        #[arg(long, default_value_t = 16)]
        queue_depth: usize,

        /// Log engine events (locks, switches, resets, issued requests).
        #[arg(long = "trace")]
        trace_events: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            config,
            queue_depth,
            trace_events,
        } => {
            if trace_events {
                install_tracing();
            }
            let config = load_config(config);
            let accesses = parse_trace(&trace);
            println!("[*] Trace replay: {} ({} accesses)", trace, accesses.len());
            drive(&config, queue_depth, accesses.into_iter());
        }
        Commands::Synth {
            pattern,
            accesses,
            streams,
            seed,
            config,
            queue_depth,
            trace_events,
        } => {
            if trace_events {
                install_tracing();
            }
            let config = load_config(config);
            let stream = synthesize(&config, &pattern, accesses, streams.max(1), seed);
            println!("[*] Synthetic run: pattern={pattern} accesses={accesses} streams={streams}");
            drive(&config, queue_depth, stream.into_iter());
        }
    }
}

/// Installs a `tracing` subscriber for engine event logging.
///
/// `RUST_LOG` overrides the default filter of debug-level engine events.
fn install_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("specfetch_core=trace"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads and validates an engine configuration, or returns the defaults.
///
/// Exits the process with code 1 on a missing file, malformed JSON, or a
/// configuration that fails validation.
fn load_config(path: Option<String>) -> EngineConfig {
    let Some(path) = path else {
        return EngineConfig::default();
    };
    let raw = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    let config: EngineConfig = serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("Invalid config {path}: {e}");
        process::exit(1);
    }
    config
}

/// Parses a text trace into `(ip, addr, hit)` access tuples.
///
/// One access per line: `<ip-hex> <addr-hex> <h|m>`. Blank lines and lines
/// starting with `#` are skipped. Malformed lines abort with a line-numbered
/// message.
fn parse_trace(path: &str) -> Vec<(u64, u64, bool)> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading trace {path}: {e}");
        process::exit(1);
    });

    let mut accesses = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = idx + 1;
        let mut fields = line.split_whitespace();
        let (Some(ip), Some(addr), Some(outcome)) = (fields.next(), fields.next(), fields.next())
        else {
            eprintln!("{path}:{lineno}: expected `<ip-hex> <addr-hex> <h|m>`, got `{line}`");
            process::exit(1);
        };
        let ip = parse_hex(path, lineno, ip);
        let addr = parse_hex(path, lineno, addr);
        let hit = match outcome {
            "h" | "H" => true,
            "m" | "M" => false,
            other => {
                eprintln!("{path}:{lineno}: expected hit flag `h` or `m`, got `{other}`");
                process::exit(1);
            }
        };
        accesses.push((ip, addr, hit));
    }
    accesses
}

/// Parses one hexadecimal trace field, with or without a `0x` prefix.
fn parse_hex(path: &str, lineno: usize, field: &str) -> u64 {
    let digits = field
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u64::from_str_radix(digits, 16).unwrap_or_else(|e| {
        eprintln!("{path}:{lineno}: bad hex value `{field}`: {e}");
        process::exit(1);
    })
}

/// Xorshift pseudo-random generator; deterministic and dependency-free.
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self(if seed == 0 { 0x2545_F491_4F6C_DD1D } else { seed })
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Generates `(ip, addr, hit)` tuples for a named synthetic pattern.
///
/// Streams are interleaved round-robin, each with its own instruction
/// pointer and address region. Exits with code 1 on an unknown pattern name.
fn synthesize(
    config: &EngineConfig,
    pattern: &str,
    accesses: u64,
    streams: u64,
    seed: u64,
) -> Vec<(u64, u64, bool)> {
    let deltas: &[i64] = match pattern {
        "stride" => &[4],
        "alternating" => &[4, 8],
        "periodic6" => &[2, 1, -1, -2, -1, 1],
        "random" => &[],
        other => {
            eprintln!("Unknown pattern `{other}`; expected stride, alternating, periodic6, or random");
            process::exit(1);
        }
    };

    let mut rng = XorShift::new(seed);
    let line_bytes = config.line_bytes.max(1);

    // One line cursor and step counter per stream; regions are spaced far
    // apart so streams never collide.
    let mut lines: Vec<i64> = (0..streams).map(|s| (1 << 24) + (s as i64) * (1 << 20)).collect();
    let mut steps: Vec<usize> = vec![0; streams as usize];

    let mut out = Vec::with_capacity(accesses as usize);
    for i in 0..accesses {
        let s = (i % streams) as usize;
        let ip = 0x40_0000 + (s as u64) * 0x40;
        let addr = (lines[s].max(0) as u64) * line_bytes;
        let hit = rng.next() & 1 == 0;
        out.push((ip, addr, hit));

        let delta = if deltas.is_empty() {
            (rng.next() % 17) as i64 - 8
        } else {
            deltas[steps[s] % deltas.len()]
        };
        steps[s] += 1;
        lines[s] = (lines[s] + delta).max(0);
    }
    out
}

/// Fixed-depth prefetch queue standing in for the host cache.
///
/// Every issued request takes a slot; one slot drains per access.
struct QueueModel {
    depth: usize,
    in_flight: usize,
}

impl QueueModel {
    fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            in_flight: 0,
        }
    }

    fn drain(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn push(&mut self) {
        self.in_flight = (self.in_flight + 1).min(self.depth);
    }
}

impl CacheHost for QueueModel {
    fn occupancy(&self) -> f64 {
        self.in_flight as f64 / self.depth as f64
    }
}

/// Runs the engine over an access stream and prints the final report.
fn drive(
    config: &EngineConfig,
    queue_depth: usize,
    accesses: impl Iterator<Item = (u64, u64, bool)>,
) {
    let mut engine = SpectralPrefetcher::new(config);
    let mut queue = QueueModel::new(queue_depth);

    for (ip, addr, hit) in accesses {
        queue.drain();
        if engine.observe(addr, ip, hit, &queue).is_some() {
            queue.push();
        }
    }

    engine.finalize().print();
}
