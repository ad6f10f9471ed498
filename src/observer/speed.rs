use crate::{MotorParams, PiController, RotorFluxObserver, StatorEmfObserver};
use num_complex::Complex32;
use num_traits::Float;

/// One sample's worth of sensorless estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedFluxEstimate {
    /// Rotor electrical speed (rad/s).
    pub w_r: f32,
    /// Rotor flux angle (rad), in (-pi, pi].
    pub theta_r: f32,
    /// Rotor flux magnitude (Wb).
    pub psi_r: f32,
}

/// Sensorless rotor speed and flux observer.
///
/// Couples a [`StatorEmfObserver`] and a [`RotorFluxObserver`] through a
/// PI controller: the imaginary part of the cross product between the two
/// back-EMF estimates vanishes when the rotor observer runs at the true
/// speed, so driving it to zero closes the speed loop.
///
/// The speed fed to the rotor observer in a given call is the estimate
/// produced by the previous call. This one-sample delay sets the loop's
/// stability margin and is part of the contract, not an artifact.
#[derive(Debug, Clone)]
pub struct SpeedFluxObserver {
    stator: StatorEmfObserver,
    rotor: RotorFluxObserver,
    speed_pi: PiController,
    w_r: f32,
}

impl SpeedFluxObserver {
    /// Build the observer around a caller-configured speed-loop PI
    /// controller; the controller's limits bound the speed estimate.
    pub fn new(speed_pi: PiController) -> Self {
        Self {
            stator: StatorEmfObserver::new(),
            rotor: RotorFluxObserver::new(),
            speed_pi,
            w_r: 0.,
        }
    }

    /// Rotor electrical speed estimate from the last `compute` call
    /// (rad/s).
    pub fn speed(&self) -> f32 {
        self.w_r
    }

    /// Rotor flux vector from the last `compute` call (Wb).
    pub fn flux(&self) -> Complex32 {
        self.rotor.flux()
    }

    /// Run one estimation cycle on the measured stator voltage `u_s` and
    /// current `i_s`.
    ///
    /// Must be called once per sampling interval `params.t_s`, in order,
    /// by a single caller.
    pub fn compute(
        &mut self,
        u_s: Complex32,
        i_s: Complex32,
        params: &MotorParams,
    ) -> SpeedFluxEstimate {
        let e_s = self.stator.compute(u_s, i_s, params);
        // Previous-sample speed estimate drives the flux integration.
        let (psi_r, e_r) = self.rotor.compute(i_s, self.w_r, params);

        // Im{conj(i_s) * (e_s - e_r)}: zero when the rotor observer spins
        // at the true rotor speed.
        let speed_err = (i_s.conj() * (e_s - e_r)).im;
        self.w_r = self.speed_pi.compute(speed_err);

        SpeedFluxEstimate {
            w_r: self.w_r,
            theta_r: psi_r.im.atan2(psi_r.re),
            psi_r: psi_r.im.hypot(psi_r.re),
        }
    }
}
