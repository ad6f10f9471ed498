//! Per-sample observers for the unmeasurable rotor state.

mod stator;
pub use stator::StatorEmfObserver;

mod rotor;
pub use rotor::RotorFluxObserver;

mod speed;
pub use speed::{SpeedFluxEstimate, SpeedFluxObserver};
