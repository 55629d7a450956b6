//! Trailing-window moving average.
//!
//! Output index `i` is the mean of input samples `max(0, i-window+1) ..= i`.
//! Near the start of the series the window shrinks to the samples available
//! so far, so every output is defined and the output length always equals
//! the input length.
//!
//! # Numeric contract
//!
//! Cost is `O(n)` for any window, including windows longer than the
//! series. A running sum slides across the input: each step adds the
//! entering sample and subtracts the leaving one, with Neumaier
//! compensation so long runs do not drift. Non-finite samples never enter
//! the sum. The window instead counts its NaN, `+inf` and `-inf` samples,
//! so a NaN or infinity only reaches the windows that contain it:
//!
//! - any NaN, or both infinities: NaN
//! - only `+inf` (or only `-inf`): that infinity
//! - otherwise: compensated sum divided by the sample count
//!
//! `window == 1` is a straight copy and reproduces the input bit for bit.

use isotherm_core::{KernelError, Window};

/// Sliding-window accumulator.
#[derive(Default)]
struct Running {
    sum: f64,
    compensation: f64,
    nan: usize,
    pos_inf: usize,
    neg_inf: usize,
}

impl Running {
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            self.nan += 1;
        } else if v == f64::INFINITY {
            self.pos_inf += 1;
        } else if v == f64::NEG_INFINITY {
            self.neg_inf += 1;
        } else {
            self.accumulate(v);
        }
    }

    fn remove(&mut self, v: f64) {
        if v.is_nan() {
            self.nan -= 1;
        } else if v == f64::INFINITY {
            self.pos_inf -= 1;
        } else if v == f64::NEG_INFINITY {
            self.neg_inf -= 1;
        } else {
            self.accumulate(-v);
        }
    }

    // Neumaier's variant of Kahan summation.
    fn accumulate(&mut self, v: f64) {
        let t = self.sum + v;
        if self.sum.abs() >= v.abs() {
            self.compensation += (self.sum - t) + v;
        } else {
            self.compensation += (v - t) + self.sum;
        }
        self.sum = t;
    }

    fn mean(&self, count: usize) -> f64 {
        if self.nan > 0 || (self.pos_inf > 0 && self.neg_inf > 0) {
            f64::NAN
        } else if self.pos_inf > 0 {
            f64::INFINITY
        } else if self.neg_inf > 0 {
            f64::NEG_INFINITY
        } else {
            (self.sum + self.compensation) / count as f64
        }
    }
}

/// Smooth `input` into `output`.
///
/// # Errors
///
/// `InvalidInput` if the two slices differ in length.
pub fn moving_average(
    input: &[f64],
    output: &mut [f64],
    window: Window,
) -> Result<(), KernelError> {
    if input.len() != output.len() {
        return Err(KernelError::invalid(format!(
            "moving average output has {} elements, input has {}",
            output.len(),
            input.len()
        )));
    }
    let w = window.get();
    if w == 1 {
        output.copy_from_slice(input);
        return Ok(());
    }
    let mut acc = Running::default();
    for (i, out) in output.iter_mut().enumerate() {
        acc.add(input[i]);
        if i >= w {
            acc.remove(input[i - w]);
        }
        *out = acc.mean(w.min(i + 1));
    }
    Ok(())
}

/// Smooth `values` in place, without scratch memory.
pub fn moving_average_in_place(values: &mut [f64], window: Window) {
    let len = values.len();
    moving_average_within(values, 0, 0, len, window);
}

/// Smooth `buf[src..src+len]` into `buf[dst..dst+len]` within one buffer.
///
/// Both regions must already be bounds-checked against `buf`.
///
/// When `dst >= src` (including the in-place case) outputs are produced from
/// the last index backwards: output `i` only reads source indices `<= i`,
/// and every element already overwritten maps to a source index `> i`.
/// When `dst < src` outputs are produced forwards, which is exact for
/// disjoint regions and for any shift of at least `window` elements.
/// Closer backward overlaps are the caller's responsibility.
pub fn moving_average_within(buf: &mut [f64], src: usize, dst: usize, len: usize, window: Window) {
    let w = window.get();
    if len == 0 {
        return;
    }
    if w == 1 {
        buf.copy_within(src..src + len, dst);
        return;
    }
    let mut acc = Running::default();
    if dst >= src {
        // Window of the last output, then slide towards the front. Each
        // source sample is read before its slot can be overwritten.
        for v in &buf[src + (len - w.min(len))..src + len] {
            acc.add(*v);
        }
        for i in (0..len).rev() {
            let value = acc.mean(w.min(i + 1));
            let leaving = buf[src + i];
            buf[dst + i] = value;
            acc.remove(leaving);
            if i >= w {
                acc.add(buf[src + i - w]);
            }
        }
    } else {
        for i in 0..len {
            acc.add(buf[src + i]);
            if i >= w {
                acc.remove(buf[src + i - w]);
            }
            buf[dst + i] = acc.mean(w.min(i + 1));
        }
    }
}
