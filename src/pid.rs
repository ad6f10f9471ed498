//! Discrete-time P/PI/PD/PID controllers with output clamping.
//!
//! All four kinds share the same shape: `compute` maps one scalar input to
//! one clamped scalar output, `reset` zeroes the history and output while
//! preserving gains, limits and the sampling interval. The integral path
//! uses trapezoidal integration and the derivative path a backward
//! difference, both acting on the proportional output.

fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let mut out = value;
    if out > max {
        out = max;
    }
    if out < min {
        out = min;
    }
    out
}

/// Proportional controller.
#[derive(Debug, Clone)]
pub struct PController {
    /// Proportional gain.
    pub k_p: f32,
    /// Output lower limit.
    pub out_min: f32,
    /// Output upper limit.
    pub out_max: f32,

    out: f32,
}

impl PController {
    pub fn new(k_p: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            k_p,
            out_min,
            out_max,
            out: 0.,
        }
    }

    pub fn compute(&mut self, input: f32) -> f32 {
        self.out = clamp(self.k_p * input, self.out_min, self.out_max);
        self.out
    }

    /// Last computed output.
    pub fn output(&self) -> f32 {
        self.out
    }

    pub fn reset(&mut self) {
        self.out = 0.;
    }
}

/// Proportional-integral controller.
#[derive(Debug, Clone)]
pub struct PiController {
    /// Proportional gain.
    pub k_p: f32,
    /// Integral gain.
    pub k_i: f32,
    /// Sampling interval (s).
    pub t_s: f32,
    /// Output lower limit.
    pub out_min: f32,
    /// Output upper limit.
    pub out_max: f32,

    i_out: f32,
    i_prev: f32,
    out: f32,
}

impl PiController {
    pub fn new(k_p: f32, k_i: f32, t_s: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            k_p,
            k_i,
            t_s,
            out_min,
            out_max,
            i_out: 0.,
            i_prev: 0.,
            out: 0.,
        }
    }

    pub fn compute(&mut self, input: f32) -> f32 {
        let p_out = self.k_p * input;

        // Trapezoidal integration of the proportional output
        let i_in = self.k_i * p_out;
        self.i_out += 0.5 * self.t_s * (i_in + self.i_prev);
        self.i_prev = i_in;

        self.out = clamp(p_out + self.i_out, self.out_min, self.out_max);
        self.out
    }

    /// Last computed output.
    pub fn output(&self) -> f32 {
        self.out
    }

    pub fn reset(&mut self) {
        self.i_out = 0.;
        self.i_prev = 0.;
        self.out = 0.;
    }
}

/// Proportional-derivative controller.
#[derive(Debug, Clone)]
pub struct PdController {
    /// Proportional gain.
    pub k_p: f32,
    /// Derivative gain.
    pub k_d: f32,
    /// Sampling interval (s).
    pub t_s: f32,
    /// Output lower limit.
    pub out_min: f32,
    /// Output upper limit.
    pub out_max: f32,

    d_prev: f32,
    out: f32,
}

impl PdController {
    pub fn new(k_p: f32, k_d: f32, t_s: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            k_p,
            k_d,
            t_s,
            out_min,
            out_max,
            d_prev: 0.,
            out: 0.,
        }
    }

    pub fn compute(&mut self, input: f32) -> f32 {
        let p_out = self.k_p * input;

        // Backward difference of the proportional output
        let d_in = self.k_d * p_out;
        let d_out = (d_in - self.d_prev) / self.t_s;
        self.d_prev = d_in;

        self.out = clamp(p_out + d_out, self.out_min, self.out_max);
        self.out
    }

    /// Last computed output.
    pub fn output(&self) -> f32 {
        self.out
    }

    pub fn reset(&mut self) {
        self.d_prev = 0.;
        self.out = 0.;
    }
}

/// Proportional-integral-derivative controller.
#[derive(Debug, Clone)]
pub struct PidController {
    /// Proportional gain.
    pub k_p: f32,
    /// Integral gain.
    pub k_i: f32,
    /// Derivative gain.
    pub k_d: f32,
    /// Sampling interval (s).
    pub t_s: f32,
    /// Output lower limit.
    pub out_min: f32,
    /// Output upper limit.
    pub out_max: f32,

    i_out: f32,
    i_prev: f32,
    d_prev: f32,
    out: f32,
}

impl PidController {
    pub fn new(k_p: f32, k_i: f32, k_d: f32, t_s: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            t_s,
            out_min,
            out_max,
            i_out: 0.,
            i_prev: 0.,
            d_prev: 0.,
            out: 0.,
        }
    }

    pub fn compute(&mut self, input: f32) -> f32 {
        let p_out = self.k_p * input;

        let i_in = self.k_i * p_out;
        self.i_out += 0.5 * self.t_s * (i_in + self.i_prev);
        self.i_prev = i_in;

        let d_in = self.k_d * p_out;
        let d_out = (d_in - self.d_prev) / self.t_s;
        self.d_prev = d_in;

        self.out = clamp(p_out + self.i_out + d_out, self.out_min, self.out_max);
        self.out
    }

    /// Last computed output.
    pub fn output(&self) -> f32 {
        self.out
    }

    pub fn reset(&mut self) {
        self.i_out = 0.;
        self.i_prev = 0.;
        self.d_prev = 0.;
        self.out = 0.;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Float;

    #[test]
    fn proportional_is_clamped_gain() {
        let cases = [
            // (k_p, input, out_min, out_max, expected)
            (2., 1.5, -5., 5., 3.),
            (2., 4., -5., 5., 5.),
            (2., -4., -5., 5., -5.),
            (-3., 1., -5., 5., -3.),
            (-3., 2., -5., 5., -5.),
            (0., 100., -5., 5., 0.),
            (10., 0.2, 0., 5., 2.),
            (10., -0.2, 0., 5., 0.),
        ];
        for (k_p, input, out_min, out_max, expected) in cases {
            let mut p = PController::new(k_p, out_min, out_max);
            assert_eq!(p.compute(input), expected);
            assert_eq!(p.output(), expected);
        }
    }

    #[test]
    fn pi_matches_trapezoidal_recurrence() {
        let (k_p, k_i, t_s) = (2., 30., 1e-3);
        let x = 0.7;

        for n in [1usize, 2, 10] {
            let mut pi = PiController::new(k_p, k_i, t_s, -1e9, 1e9);
            let mut out = 0.;
            for _ in 0..n {
                out = pi.compute(x);
            }

            // Direct recurrence: i[k] = i[k-1] + 0.5*t_s*k_i*(p[k] + p[k-1])
            // with p constant after the first sample and zero before it.
            let p = k_p * x;
            let mut i = 0.;
            let mut i_prev_in = 0.;
            for _ in 0..n {
                i += 0.5 * t_s * (k_i * p + i_prev_in);
                i_prev_in = k_i * p;
            }
            let expected = p + i;

            assert!(
                (out - expected).abs() < 1e-6,
                "n={n}: {out} vs {expected}"
            );
        }
    }

    #[test]
    fn pi_output_is_clamped() {
        let mut pi = PiController::new(10., 0., 1e-3, -1., 1.);
        assert_eq!(pi.compute(5.), 1.);
        assert_eq!(pi.compute(-5.), -1.);
    }

    #[test]
    fn pd_backward_difference() {
        let (k_p, k_d, t_s) = (1., 0.5, 1e-2);
        let mut pd = PdController::new(k_p, k_d, t_s, -1e9, 1e9);

        // First sample differentiates against zero history.
        let out = pd.compute(2.);
        assert!((out - (2. + 0.5 * 2. / t_s)).abs() < 1e-4);

        // Held input: derivative path settles to zero.
        let out = pd.compute(2.);
        assert!((out - 2.).abs() < 1e-6);

        // Step down by 1: derivative is k_d * (-1) / t_s.
        let out = pd.compute(1.);
        assert!((out - (1. - 0.5 / t_s)).abs() < 1e-4);
    }

    #[test]
    fn pid_sums_all_three_paths() {
        let (k_p, k_i, k_d, t_s) = (2., 3., 0.1, 1e-2);
        let x = 0.5;

        let mut pid = PidController::new(k_p, k_i, k_d, t_s, -1e9, 1e9);
        let mut pi = PiController::new(k_p, k_i, t_s, -1e9, 1e9);
        let mut pd = PdController::new(k_p, k_d, t_s, -1e9, 1e9);

        for _ in 0..5 {
            let full = pid.compute(x);
            let split = pi.compute(x) + pd.compute(x) - k_p * x;
            assert!((full - split).abs() < 1e-5);
        }
    }

    #[test]
    fn reset_reproduces_zero_outputs() {
        let mut p = PController::new(2., -5., 5.);
        let mut pi = PiController::new(2., 3., 1e-3, -5., 5.);
        let mut pd = PdController::new(2., 0.5, 1e-3, -5., 5.);
        let mut pid = PidController::new(2., 3., 0.5, 1e-3, -5., 5.);

        for _ in 0..4 {
            p.compute(1.);
            pi.compute(1.);
            pd.compute(1.);
            pid.compute(1.);
        }

        p.reset();
        pi.reset();
        pd.reset();
        pid.reset();
        assert_eq!(p.output(), 0.);
        assert_eq!(pi.output(), 0.);
        assert_eq!(pd.output(), 0.);
        assert_eq!(pid.output(), 0.);

        for _ in 0..4 {
            assert_eq!(p.compute(0.), 0.);
            assert_eq!(pi.compute(0.), 0.);
            assert_eq!(pd.compute(0.), 0.);
            assert_eq!(pid.compute(0.), 0.);
        }

        // Gains and limits survive the reset.
        assert_eq!(pi.k_p, 2.);
        assert_eq!(pi.k_i, 3.);
        assert_eq!(pi.t_s, 1e-3);
        assert_eq!(pi.out_min, -5.);
        assert_eq!(pi.out_max, 5.);
    }
}
