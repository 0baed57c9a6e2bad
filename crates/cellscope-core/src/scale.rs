//! Scales: numeric and categorical domains mapped onto pixel ranges, plus ticks.
//!
//! [`LinearScale`] is a monotonic, invertible affine map. [`BandScale`] lays
//! out a finite set of category labels as evenly spaced bands. Neither ever
//! divides by zero: a zero-width domain maps every value to the middle of the
//! range and inverts every pixel to the domain's single value.

use serde::{Deserialize, Serialize};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// A tick: domain value plus its formatted label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Domain value
    pub value: f64,
    /// Display label
    pub label: String,
}

/// Linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    /// Create a scale from `domain` onto `range`. Either may be reversed.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain bounds as given.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Range bounds as given.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Same range, different domain.
    #[must_use]
    pub const fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self::new(domain, self.range)
    }

    /// Same domain, different range.
    #[must_use]
    pub const fn with_range(&self, range: (f64, f64)) -> Self {
        Self::new(self.domain, range)
    }

    /// True when the domain has zero (or non-finite) width.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let span = self.domain.1 - self.domain.0;
        span == 0.0 || !span.is_finite()
    }

    /// Map a domain value to a pixel position.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        ((value - d0) / (d1 - d0)).mul_add(r1 - r0, r0)
    }

    /// Map a pixel position back to the domain.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if self.is_degenerate() || span == 0.0 || !span.is_finite() {
            return d0;
        }
        ((pixel - r0) / span).mul_add(d1 - d0, d0)
    }

    /// Roughly `count` round tick values inside the domain, ascending.
    ///
    /// Never yields duplicates or values outside the domain. A zero-width
    /// domain yields the single domain value.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        ticks(a.min(b), a.max(b), count)
    }

    /// Ticks paired with labels whose precision matches the tick step.
    #[must_use]
    pub fn tick_labels(&self, count: usize) -> Vec<Tick> {
        let (a, b) = self.domain;
        let (lo, hi) = (a.min(b), a.max(b));
        let step = tick_step(lo, hi, count).abs();
        let decimals = precision_for_step(step);
        ticks(lo, hi, count)
            .into_iter()
            .map(|value| Tick {
                value,
                label: format_grouped(value, decimals),
            })
            .collect()
    }

    /// Extend the domain outward to round values at the given tick count.
    #[must_use]
    pub fn nice(&self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        if self.is_degenerate() || count == 0 {
            return *self;
        }
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut previous = None;

        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        let domain = if reversed { (stop, start) } else { (start, stop) };
        self.with_domain(domain)
    }
}

/// Evenly spaced categorical bands over a pixel range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    labels: Vec<String>,
    range: (f64, f64),
    padding: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Create a band scale with the given inner/outer padding fraction.
    #[must_use]
    pub fn new<I, S>(labels: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scale = Self {
            labels: labels.into_iter().map(Into::into).collect(),
            range,
            padding: padding.clamp(0.0, 1.0),
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.layout();
        scale
    }

    fn layout(&mut self) {
        let n = self.labels.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = (r0.min(r1), r0.max(r1));
        let p = self.padding;
        let step = (hi - lo) / (n - p + p * 2.0).max(1.0);
        // Centered: align 0.5.
        self.start = (step.mul_add(-(n - p), hi - lo)).mul_add(0.5, lo);
        self.step = step;
        self.bandwidth = step * (1.0 - p);
    }

    /// Category labels in band order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Width of a single band.
    #[must_use]
    pub const fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Left edge of the band for `label`, or `None` for unknown labels.
    #[must_use]
    pub fn map(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.band_start(i))
    }

    /// Left edge of the `index`-th band.
    #[must_use]
    pub fn band_start(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.step, self.start)
    }

    /// Center of the `index`-th band.
    #[must_use]
    pub fn band_center(&self, index: usize) -> f64 {
        self.band_start(index) + self.bandwidth / 2.0
    }
}

/// Tick values for `[start, stop]` with `start <= stop`.
fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let Some((i1, i2, inc)) = tick_spec(start, stop, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    // Integer indices keep ticks free of duplicates and drift.
    (i1..=i2)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 {
                i / -inc
            } else {
                i * inc
            }
        })
        .collect()
}

/// Signed tick increment: positive is a step size, negative is `-1/step`.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).map_or(0.0, |(_, _, inc)| inc)
}

/// Absolute tick step size.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let inc = tick_increment(start, stop, count);
    if inc < 0.0 {
        -1.0 / inc
    } else {
        inc
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round() as i64;
        i2 = (stop * scale).round() as i64;
        if (i1 as f64) / scale < start {
            i1 += 1;
        }
        if (i2 as f64) / scale > stop {
            i2 -= 1;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = (start / scale).round() as i64;
        i2 = (stop / scale).round() as i64;
        if (i1 as f64) * scale < start {
            i1 += 1;
        }
        if (i2 as f64) * scale > stop {
            i2 -= 1;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Fraction digits needed to show multiples of `step` exactly.
fn precision_for_step(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Fixed-point formatting with thousands separators, e.g. `1,250.5`.
#[must_use]
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}
