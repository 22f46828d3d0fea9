//! Height response curves applied to raw field values before vertical scaling.

use serde::{Deserialize, Serialize};

/// Remaps a raw height to a shaped height.
pub trait ResponseCurve {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F> ResponseCurve for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

/// Passes heights through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityCurve;

impl ResponseCurve for IdentityCurve {
    fn evaluate(&self, t: f32) -> f32 {
        t
    }
}

/// A curve control point with incoming and outgoing slopes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// A keyframed curve evaluated with cubic Hermite interpolation.
///
/// Keys are kept sorted by time. Outside the key range the curve holds the
/// first or last value; an empty curve evaluates to `0.0`. A non-finite tangent
/// makes its segment a step that holds the left key's value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Build a piecewise-linear curve through `points` (`(time, value)` pairs).
    pub fn linear(points: &[(f32, f32)]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let slope = |i: usize| {
            let (t0, v0) = sorted[i];
            let (t1, v1) = sorted[i + 1];
            if t1 > t0 { (v1 - v0) / (t1 - t0) } else { 0.0 }
        };
        let segments = sorted.len().saturating_sub(1);

        let keys = (0..sorted.len())
            .map(|i| {
                let (time, value) = sorted[i];
                let out_tangent = if i < segments { slope(i) } else { 0.0 };
                let in_tangent = if i > 0 { slope(i - 1) } else { out_tangent };
                let out_tangent = if i < segments { out_tangent } else { in_tangent };
                Keyframe::new(time, value, in_tangent, out_tangent)
            })
            .collect();

        Self { keys }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl ResponseCurve for KeyframeCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after `t`; exists because `t < last.time`.
        let hi = self.keys.partition_point(|k| k.time <= t);
        let k0 = self.keys[hi - 1];
        let k1 = self.keys[hi];

        let dt = k1.time - k0.time;
        if dt <= 0.0 {
            return k1.value;
        }
        let m0 = k0.out_tangent * dt;
        let m1 = k1.in_tangent * dt;
        if !m0.is_finite() || !m1.is_finite() {
            return k0.value;
        }

        let s = (t - k0.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * m0 + h01 * k1.value + h11 * m1
    }
}

impl From<Vec<Keyframe>> for KeyframeCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<KeyframeCurve> for Vec<Keyframe> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_closure_is_a_curve() {
        let double = |t: f32| t * 2.0;
        assert_eq!(double.evaluate(1.5), 3.0);
        assert_eq!(IdentityCurve.evaluate(-0.25), -0.25);
    }

    #[test]
    fn test_empty_curve_evaluates_to_zero() {
        assert_eq!(KeyframeCurve::default().evaluate(0.7), 0.0);
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = KeyframeCurve::new(vec![Keyframe::new(0.5, 0.3, 0.0, 0.0)]);
        assert_eq!(curve.evaluate(-10.0), 0.3);
        assert_eq!(curve.evaluate(10.0), 0.3);
    }

    #[test]
    fn test_curve_clamps_outside_key_range() {
        let curve = KeyframeCurve::linear(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(1.7), 1.0);
    }

    #[test]
    fn test_linear_curve_interpolates_linearly() {
        let curve = KeyframeCurve::linear(&[(0.0, 0.0), (0.8, 0.05), (2.0, 1.0)]);
        for (t, expected) in [(0.4, 0.025), (0.8, 0.05), (1.4, 0.525)] {
            let v = curve.evaluate(t);
            assert!((v - expected).abs() < EPSILON, "f({t}) = {v}, expected {expected}");
        }
    }

    #[test]
    fn test_hermite_hits_keys_exactly() {
        let curve = KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 1.0, 0.0, 0.0),
        ]);
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
        // Flat tangents give a smoothstep.
        assert!((curve.evaluate(0.5) - 0.5).abs() < EPSILON);
        assert!((curve.evaluate(0.25) - 0.15625).abs() < EPSILON);
    }

    #[test]
    fn test_infinite_tangent_steps() {
        let curve = KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.2, 0.0, f32::INFINITY),
            Keyframe::new(1.0, 0.9, f32::INFINITY, 0.0),
        ]);
        assert_eq!(curve.evaluate(0.6), 0.2);
    }

    #[test]
    fn test_keys_are_sorted_on_construction() {
        let curve = KeyframeCurve::new(vec![
            Keyframe::new(1.0, 1.0, 1.0, 1.0),
            Keyframe::new(0.0, 0.0, 1.0, 1.0),
        ]);
        assert_eq!(curve.keys()[0].time, 0.0);
        assert!((curve.evaluate(0.5) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_curve_deserializes_from_key_list() {
        let curve: KeyframeCurve = ron::from_str(
            "[(time: 1.0, value: 2.0, in_tangent: 2.0, out_tangent: 2.0), (time: 0.0, value: 0.0)]",
        )
        .unwrap();
        assert_eq!(curve.keys().len(), 2);
        assert_eq!(curve.keys()[0].time, 0.0);
        assert_eq!(curve.evaluate(1.0), 2.0);
    }
}
