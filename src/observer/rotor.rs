use crate::MotorParams;
use num_complex::Complex32;

/// Rotor flux and back-EMF observer.
///
/// Integrates the rotor flux vector in the stationary alpha/beta frame
/// from the measured stator current and the rotor electrical speed. With a
/// measured speed input this is the sensored flux observer; inside
/// [`crate::SpeedFluxObserver`] it runs on the estimated speed instead.
///
/// The flux differential equation
///
/// ```text
/// d(psi_r)/dt = (i_s * l_m - psi_r) / t_r + j * w_r * psi_r
/// ```
///
/// is discretized with trapezoidal integration. Both axes read only the
/// previous call's flux, so the cross-coupling terms are independent of
/// any evaluation order within a call; the axes reference each other
/// through history alone.
#[derive(Debug, Clone, Default)]
pub struct RotorFluxObserver {
    // Integrator state, i.e. the previous call's flux.
    psi_r: Complex32,
    // Previous rotor back-EMF, for the trapezoid.
    e_r_prev: Complex32,
}

impl RotorFluxObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotor flux vector produced by the last `compute` call (Wb).
    pub fn flux(&self) -> Complex32 {
        self.psi_r
    }

    /// Advance the flux integral by one sample and return the rotor flux
    /// and rotor back-EMF vectors.
    ///
    /// `w_r` is the rotor electrical speed (rad/s). The integral is only
    /// meaningful when the calls are spaced exactly `params.t_s` apart;
    /// irregular spacing degrades it silently.
    pub fn compute(
        &mut self,
        i_s: Complex32,
        w_r: f32,
        params: &MotorParams,
    ) -> (Complex32, Complex32) {
        let psi_prev = self.psi_r;

        let e_r = (i_s * params.l_m - psi_prev) * params.inv_t_r
            + Complex32::new(0., w_r) * psi_prev;
        let psi_r = psi_prev + 0.5 * params.t_s * (e_r + self.e_r_prev);

        self.e_r_prev = e_r;
        self.psi_r = psi_r;

        (psi_r, e_r)
    }
}
