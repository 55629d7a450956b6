//! Benchmark profiles for the Isotherm kernel.
//!
//! Each profile is a pre-filled [`Arena`] plus the [`Layout`] describing
//! where its regions live:
//!
//! - [`ten_days_hourly`]: 240 samples, the size of a typical host request
//! - [`year_hourly`]: 8,760 samples
//! - [`stress`]: 1,000,000 samples for throughput runs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use isotherm_arena::{Arena, ArenaError, Layout};
use isotherm_test_utils::{hourly_temperatures, index_axis, ArenaFixture};

/// A filled arena ready for kernel calls.
///
/// Regions: `raw` and `x` hold samples and the index axis `1..=n`,
/// `smoothed` is zeroed, `slope`, `intercept` and `summary` are outputs.
pub struct Profile {
    /// Arena holding every region.
    pub arena: Arena,
    /// Where each region lives.
    pub layout: Layout,
    /// Number of samples.
    pub n: usize,
}

/// Build a profile of `days * 24` hourly samples from `seed`.
pub fn hourly_profile(days: usize, seed: u64) -> Result<Profile, ArenaError> {
    let samples = hourly_temperatures(days, seed);
    profile_from(&samples)
}

/// Build a profile around arbitrary samples.
pub fn profile_from(samples: &[f64]) -> Result<Profile, ArenaError> {
    let n = samples.len();
    let (arena, layout) = ArenaFixture::new()
        .series("raw", samples)
        .series("x", &index_axis(n, 1.0))
        .zeroed("smoothed", n)
        .zeroed("summary", 6)
        .scalar("slope")
        .scalar("intercept")
        .build()?;
    Ok(Profile { arena, layout, n })
}

/// Ten days of hourly samples (240).
pub fn ten_days_hourly(seed: u64) -> Result<Profile, ArenaError> {
    hourly_profile(10, seed)
}

/// A year of hourly samples (8,760).
pub fn year_hourly(seed: u64) -> Result<Profile, ArenaError> {
    hourly_profile(365, seed)
}

/// Roughly a million samples.
pub fn stress(seed: u64) -> Result<Profile, ArenaError> {
    hourly_profile(41_667, seed)
}
