//! Induction machine parameters and derived coupling coefficients.

/// Errors rejected at parameter configuration time.
///
/// Each variant names a constant that would otherwise derive an infinite
/// or NaN coefficient and silently corrupt every downstream estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// Sampling interval is zero, negative or not finite.
    #[error("sampling interval must be positive and finite")]
    InvalidSamplingInterval,
    /// Rotor inductance is zero.
    #[error("rotor inductance must be non-zero")]
    ZeroRotorInductance,
    /// Magnetizing inductance is zero.
    #[error("magnetizing inductance must be non-zero")]
    ZeroMagnetizingInductance,
    /// Stator inductance is zero.
    #[error("stator inductance must be non-zero")]
    ZeroStatorInductance,
    /// `l_s * l_r == l_m * l_m`, leaving the machine with no leakage.
    #[error("inductances are magnetically degenerate")]
    DegenerateInductances,
}

/// Induction machine constants plus the coupling coefficients derived
/// from them.
///
/// The derived coefficients are valid only after [`MotorParams::init`] has
/// run on the current constants. Mutating a constant field does not
/// recompute them; call `init` again afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorParams {
    /// Sampling interval (s).
    pub t_s: f32,

    /// Pole-pair count. Not used by the estimation equations; it is the
    /// caller's conversion factor between electrical and mechanical speed.
    pub n_p: f32,

    /// Stator resistance (Ohm).
    pub r_s: f32,

    /// Rotor resistance (Ohm).
    pub r_r: f32,

    /// Stator inductance (H).
    pub l_s: f32,

    /// Rotor inductance (H).
    pub l_r: f32,

    /// Magnetizing inductance (H).
    pub l_m: f32,

    // Derived by `init`.
    pub(crate) inv_t_r: f32,
    pub(crate) inv_k_r: f32,
    pub(crate) l_sgm: f32,
}

impl MotorParams {
    /// Build a parameter record from the machine constants and derive the
    /// coupling coefficients.
    pub fn new(
        t_s: f32,
        n_p: f32,
        r_s: f32,
        r_r: f32,
        l_s: f32,
        l_r: f32,
        l_m: f32,
    ) -> Result<Self, ParamError> {
        let mut params = Self {
            t_s,
            n_p,
            r_s,
            r_r,
            l_s,
            l_r,
            l_m,
            inv_t_r: 0.,
            inv_k_r: 0.,
            l_sgm: 0.,
        };
        params.init()?;
        Ok(params)
    }

    /// Validate the constants and (re)compute the derived coefficients:
    /// the inverse rotor time constant `r_r/l_r`, the inverse coupling
    /// factor `l_r/l_m` and the leakage inductance
    /// `(1 - l_m^2/(l_s*l_r)) * l_s`.
    ///
    /// Idempotent: repeating the call with unchanged constants yields
    /// bit-identical coefficients.
    pub fn init(&mut self) -> Result<(), ParamError> {
        if !(self.t_s > 0.) || !self.t_s.is_finite() {
            return Err(ParamError::InvalidSamplingInterval);
        }
        if self.l_r == 0. {
            return Err(ParamError::ZeroRotorInductance);
        }
        if self.l_m == 0. {
            return Err(ParamError::ZeroMagnetizingInductance);
        }
        if self.l_s == 0. {
            return Err(ParamError::ZeroStatorInductance);
        }
        if self.l_s * self.l_r == self.l_m * self.l_m {
            return Err(ParamError::DegenerateInductances);
        }

        self.inv_t_r = self.r_r / self.l_r;
        self.inv_k_r = self.l_r / self.l_m;
        self.l_sgm = (1. - self.l_m * self.l_m / (self.l_s * self.l_r)) * self.l_s;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "motor params: 1/Tr={} 1/Kr={} sigma*Ls={}",
            self.inv_t_r,
            self.inv_k_r,
            self.l_sgm
        );

        Ok(())
    }
}
