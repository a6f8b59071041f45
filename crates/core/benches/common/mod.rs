use std::env;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Criterion, Throughput};

use fukidashi_core::model::Detection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

impl BenchTier {
    pub fn from_env() -> Self {
        match env::var("FUKIDASHI_BENCH_TIER").as_deref() {
            Ok("full") => Self::Full,
            _ => Self::Quick,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub tier: BenchTier,
    pub seed: u64,
    pub sample_size: usize,
    pub measurement: Duration,
}

pub fn bench_config() -> BenchConfig {
    let tier = BenchTier::from_env();
    let seed = env::var("FUKIDASHI_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);
    let (sample_size, measurement) = match tier {
        BenchTier::Quick => (20, Duration::from_secs(3)),
        BenchTier::Full => (30, Duration::from_secs(8)),
    };

    BenchConfig {
        tier,
        seed,
        sample_size,
        measurement,
    }
}

pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, cfg: &BenchConfig) {
    group.sample_size(cfg.sample_size);
    group.measurement_time(cfg.measurement);
}

pub fn bench_criterion() -> Criterion {
    Criterion::default().configure_from_args()
}

pub fn lines_throughput(lines: usize) -> Throughput {
    Throughput::Elements(lines as u64)
}

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }
}

/// A synthetic page: `count` lines laid out in bubbles of three lines each,
/// four bubbles per row, read right to left.
pub fn synthetic_page(seed: u64, count: usize) -> Vec<Detection> {
    let mut rng = XorShift64::new(seed);
    let mut dets = Vec::with_capacity(count);
    for i in 0..count {
        let bubble = i / 3;
        let line = (i % 3) as f64;
        let col = (bubble % 4) as f64;
        let row = (bubble / 4) as f64;
        let x0 = 40.0 + col * 220.0 + rng.gen_f64(0.0, 6.0);
        let y0 = 30.0 + row * 140.0 + line * 24.0 + rng.gen_f64(0.0, 3.0);
        let w = rng.gen_f64(80.0, 140.0);
        let h = 20.0;
        let quad = [(x0, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0, y0 + h)];
        let score = rng.gen_f64(0.6, 1.0);
        dets.push(Detection::new(quad, format!("line{}", i), score));
    }
    dets
}
