#![no_std]

//! Rotor flux and speed estimation for induction motor drives.
//!
//! Electrical quantities in the two-axis (alpha/beta) frame are carried as
//! [`num_complex::Complex32`] space vectors with `re` = alpha and
//! `im` = beta. Each estimator is a caller-owned record advanced once per
//! sampling interval by its `compute` method; the caller owns sampling,
//! actuation and invocation timing.

pub mod observer;
pub use observer::{RotorFluxObserver, SpeedFluxEstimate, SpeedFluxObserver, StatorEmfObserver};

pub mod params;
pub use params::{MotorParams, ParamError};

pub mod pid;
pub use pid::{PController, PdController, PiController, PidController};
