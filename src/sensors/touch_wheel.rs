//! Three-pad capacitive wheel plus center button.
//!
//! Baselines are averaged once at boot and never re-learned.  Wheel
//! contact is latched with asymmetric hysteresis:
//!
//! ```text
//!  released ── any pad < base - ON ──────────────▶ touching
//!  touching ── all pads > base - (ON + OFF) ─────▶ released
//! ```
//!
//! While touching, the three inverted readings are normalised and summed
//! as vectors on directions 120° apart (Q3 at 0°, Q1 at 120°, Q2 at
//! 240°); the angle of the result is the finger position.

use core::f32::consts::TAU;

use embedded_hal::delay::DelayNs;
use log::info;

use super::{RawTouch, TouchReading};
use crate::app::ports::TouchPort;
use crate::config::GameConfig;

/// Counts are inverted against this reference before weighting.
const CENTROID_REFERENCE: f32 = 1000.0;

/// Per-pad idle levels learned at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchCalibration {
    pub q1: i32,
    pub q2: i32,
    pub q3: i32,
    pub center: i32,
}

impl TouchCalibration {
    /// Average `samples` reads spaced `interval_ms` apart.
    pub fn measure(
        port: &mut impl TouchPort,
        delay: &mut impl DelayNs,
        samples: u16,
        interval_ms: u32,
    ) -> Self {
        let n = i64::from(samples.max(1));
        let (mut s1, mut s2, mut s3, mut sc) = (0i64, 0i64, 0i64, 0i64);
        for _ in 0..n {
            let raw = port.read_touch();
            s1 += i64::from(raw.q1);
            s2 += i64::from(raw.q2);
            s3 += i64::from(raw.q3);
            sc += i64::from(raw.center);
            delay.delay_ms(interval_ms);
        }
        Self {
            q1: (s1 / n) as i32,
            q2: (s2 / n) as i32,
            q3: (s3 / n) as i32,
            center: (sc / n) as i32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TouchWheel {
    cal: TouchCalibration,
    on_delta: i32,
    off_delta: i32,
    center_threshold: i32,
    touching: bool,
}

impl TouchWheel {
    pub fn new(cal: TouchCalibration, config: &GameConfig) -> Self {
        Self {
            cal,
            on_delta: config.touch_on_delta,
            off_delta: config.touch_off_delta,
            center_threshold: config.center_threshold,
            touching: false,
        }
    }

    /// Measure baselines from the port, then build the interpreter.
    pub fn calibrate(
        port: &mut impl TouchPort,
        delay: &mut impl DelayNs,
        config: &GameConfig,
    ) -> Self {
        let cal = TouchCalibration::measure(
            port,
            delay,
            config.calibration_samples,
            config.calibration_interval_ms,
        );
        info!(
            "touch: baselines q1={} q2={} q3={} center={}",
            cal.q1, cal.q2, cal.q3, cal.center
        );
        Self::new(cal, config)
    }

    pub fn calibration(&self) -> &TouchCalibration {
        &self.cal
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Interpret one raw sample.
    pub fn sample(&mut self, raw: RawTouch) -> TouchReading {
        self.touching = self.wheel_contact(&raw);
        TouchReading {
            wheel_angle: self.touching.then(|| centroid_angle(&raw)),
            center_pressed: raw.center < self.cal.center - self.center_threshold,
        }
    }

    fn wheel_contact(&self, raw: &RawTouch) -> bool {
        let pads = [
            (raw.q1, self.cal.q1),
            (raw.q2, self.cal.q2),
            (raw.q3, self.cal.q3),
        ];
        if self.touching {
            let release = self.on_delta + self.off_delta;
            !pads.iter().all(|&(v, base)| v > base - release)
        } else {
            pads.iter().any(|&(v, base)| v < base - self.on_delta)
        }
    }
}

/// Finger angle in degrees, wrapped to `[0, 360)`.
pub fn centroid_angle(raw: &RawTouch) -> f32 {
    let t0 = CENTROID_REFERENCE - raw.q2 as f32;
    let t1 = CENTROID_REFERENCE - raw.q1 as f32;
    let t2 = CENTROID_REFERENCE - raw.q3 as f32;
    let mut total = t0 + t1 + t2;
    if total < 1.0 {
        total = 1.0;
    }
    let (t0, t1, t2) = (t0 / total, t1 / total, t2 / total);

    let a1 = TAU / 3.0;
    let a2 = 2.0 * TAU / 3.0;
    let x = t2 + t1 * a1.cos() + t0 * a2.cos();
    let y = t1 * a1.sin() + t0 * a2.sin();

    let mut deg = (-y).atan2(x).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    if deg >= 360.0 {
        deg -= 360.0;
    }
    deg
}
