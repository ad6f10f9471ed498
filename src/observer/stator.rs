use crate::MotorParams;
use num_complex::Complex32;

/// Stator back-EMF observer.
///
/// Estimates the induced stator voltage from the measured stator current
/// and voltage through the stator voltage balance, using a one-step
/// backward difference for the current derivative. The raw difference
/// amplifies sampling noise at low sample rates; no filtering is applied.
#[derive(Debug, Clone, Default)]
pub struct StatorEmfObserver {
    // Previous-sample stator current, for the backward difference.
    i_s_prev: Complex32,
}

impl StatorEmfObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the stator back-EMF vector from the measured stator
    /// voltage `u_s` and current `i_s`.
    ///
    /// Must be called once per sampling interval `params.t_s`; the
    /// derivative is scaled by that interval.
    pub fn compute(&mut self, u_s: Complex32, i_s: Complex32, params: &MotorParams) -> Complex32 {
        let di_dt = (i_s - self.i_s_prev) / params.t_s;
        self.i_s_prev = i_s;

        (u_s - params.r_s * i_s - params.l_sgm * di_dt) * params.inv_k_r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Float;

    fn test_motor() -> MotorParams {
        MotorParams::new(1e-4, 2., 1., 1., 0.1, 0.1, 0.095).unwrap()
    }

    #[test]
    fn settles_to_zero_for_matched_voltage() {
        let params = test_motor();
        let mut obs = StatorEmfObserver::new();

        let i_s = Complex32::new(1., 0.);
        let u_s = params.r_s * i_s;

        // First call sees the step from zero history: the derivative term
        // dominates.
        let e_s = obs.compute(u_s, i_s, &params);
        assert!(e_s.re < -100.);
        assert_eq!(e_s.im, 0.);

        // Held current: derivative vanishes and the resistive drop cancels
        // the applied voltage exactly.
        let e_s = obs.compute(u_s, i_s, &params);
        assert!(e_s.re.abs() < 1e-6);
        assert!(e_s.im.abs() < 1e-6);
    }

    #[test]
    fn ramp_current_isolates_leakage_term() {
        let params = test_motor();
        let mut obs = StatorEmfObserver::new();

        // i rises by `slope * t_s` per sample with u held at zero; once
        // the history is primed the estimate is the resistive plus
        // leakage-inductance drop.
        let slope = 200.;
        let mut e_s = Complex32::default();
        for n in 0..10 {
            let i_s = Complex32::new(slope * params.t_s * n as f32, 0.);
            e_s = obs.compute(Complex32::default(), i_s, &params);
        }

        let i_last = slope * params.t_s * 9.;
        let expected = -(params.r_s * i_last + params.l_sgm * slope) * params.inv_k_r;
        assert!((e_s.re - expected).abs() < 1e-3);
    }
}
