//! Shared fixtures for the integration tests.

use linear_lab::dataset::Dataset;
use std::path::Path;

/// Twenty rows on `x = [10, 10, 11, ..., 28]` with hand-written noise, in the
/// layout `generate_data` writes.
pub const FIXTURE_CSV: &str = "x,y
10,10.42
10,8.87
11,11.27
12,12.85
13,12.36
14,15.31
15,14.92
16,15.08
17,17.55
18,18.17
19,17.54
20,20.73
21,21.09
22,21.69
23,24.02
24,23.43
25,25.38
26,25.79
27,27.96
28,27.26
";

#[allow(dead_code)]
pub fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("simple_example.csv");
    std::fs::write(&path, FIXTURE_CSV).unwrap();
    path
}

#[allow(dead_code)]
pub fn fixture() -> Dataset {
    linear_lab::dataset::io::read_from(FIXTURE_CSV.as_bytes()).unwrap()
}
