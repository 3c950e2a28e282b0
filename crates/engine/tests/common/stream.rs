//! Address-stream construction and engine-driving helpers.

use specfetch_core::{CacheHost, EngineConfig, PrefetchRequest, Prefetcher, SpectralPrefetcher};

/// Default configuration with a page wide enough that scenario streams never
/// cross a boundary; page behavior is tested separately with real 4 KiB pages.
pub fn wide_page_config() -> EngineConfig {
    EngineConfig {
        page_bytes: 1 << 30,
        ..EngineConfig::default()
    }
}

/// Expands a repeating delta pattern into a byte-address stream.
///
/// The stream starts at `base_line` (64-byte lines) and the delta observed
/// between access `i` and `i + 1` is `pattern[i % pattern.len()]`.
pub fn address_stream(base_line: u64, pattern: &[i64], accesses: usize) -> Vec<u64> {
    let mut addrs = Vec::with_capacity(accesses);
    let mut line = base_line as i64;
    for i in 0..accesses {
        addrs.push((line as u64) << 6);
        line += pattern[i % pattern.len()];
    }
    addrs
}

/// Drives an address stream through the engine under one instruction pointer.
///
/// All accesses are reported as misses. Returns the engine's emission for
/// every access, in order.
pub fn drive(
    engine: &mut SpectralPrefetcher,
    ip: u64,
    addrs: &[u64],
    host: &dyn CacheHost,
) -> Vec<Option<PrefetchRequest>> {
    addrs
        .iter()
        .map(|&addr| engine.observe(addr, ip, false, host))
        .collect()
}
