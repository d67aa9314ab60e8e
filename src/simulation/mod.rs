pub mod eclipse;
pub mod engine;
pub mod predict;
pub mod step;

pub use eclipse::{detect_eclipses, Eclipse};
pub use engine::{DayReport, EphemerisSeed, SimulationEngine};
pub use predict::{ModelPrediction, Prediction, SkyPrediction};
pub use step::{run_daily_step, CorrectionMuting, Recalibration, Solstice, StepOutcome};
