//! Interactive, gesture-driven adjustment of decline parameters
//!
//! A gesture on a phase goes `start` → any number of `update` → `end`. The gesture source is
//! abstracted as a stream of [PointerSample]s plus a [Modifier] choosing the parameter, see
//! [AdjustmentConfig] for the mapping.

mod config;
pub use config::{
    AdjustmentConfig, AdjustmentMapping, DomainPercentageSensitivity, PixelDeltaSensitivity,
};

mod engine;
pub use engine::InteractiveAdjustmentEngine;

mod session;
pub use session::{DragSession, DragTarget, Modifier, PointerSample};

mod store;
pub use store::ParameterStore;
