//! Benchmarks for the scanner
//!
//! Run with: cargo bench --bench scan

use csvtint::scan::{detect_delimiter, scan, scan_all, ScanConfig};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Sample data
// ============================================================================

const ROW: &str = "42,\"Smith, John\",\"said \"\"hi\"\"\",3.14,  padded  \r\n";

fn sample(rows: usize) -> String {
    let mut text = String::from("id,name,quote,value,note\r\n");
    text.push_str(&ROW.repeat(rows));
    text
}

fn escaped_sample(rows: usize) -> String {
    "7,\"path C:\\\\dir\",\"he said \\\"no\\\"\",x\n".repeat(rows)
}

// ============================================================================
// Scanning
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn scan_rfc4180(bencher: divan::Bencher, rows: usize) {
    let text = sample(rows);
    let config = ScanConfig::default();
    bencher.bench(|| scan(divan::black_box(&text), &config).count());
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn scan_collect(bencher: divan::Bencher, rows: usize) {
    let text = sample(rows);
    let config = ScanConfig::default();
    bencher.bench(|| scan_all(divan::black_box(&text), &config));
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn scan_marked_whitespace(bencher: divan::Bencher, rows: usize) {
    let text = sample(rows);
    let config = ScanConfig::default().with_mark_whitespace(true);
    bencher.bench(|| scan(divan::black_box(&text), &config).count());
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn scan_backslash_escape(bencher: divan::Bencher, rows: usize) {
    let text = escaped_sample(rows);
    let Ok(config) = ScanConfig::default().with_escape(Some('\\')) else {
        return;
    };
    bencher.bench(|| scan(divan::black_box(&text), &config).count());
}

// ============================================================================
// Delimiter detection
// ============================================================================

#[divan::bench(args = [10, 10_000])]
fn detect(bencher: divan::Bencher, rows: usize) {
    let text = sample(rows).replace(',', ";");
    bencher.bench(|| detect_delimiter(divan::black_box(&text)));
}
