use crate::data::Phase;
use crate::decline::DeclineParameters;
use crate::error::AdjustmentError;
use crate::float_trait::Float;
use crate::interactive::config::AdjustmentConfig;
use crate::interactive::session::{DragSession, Modifier, PointerSample};
use crate::interactive::store::ParameterStore;

use std::collections::BTreeMap;

/// Gesture-driven editing of per-phase decline parameters
///
/// Every phase is either idle or has a single [DragSession]. Starting a gesture disables auto-fit
/// for the phase until [InteractiveAdjustmentEngine::reset_auto_fit]. Sessions of different phases
/// are independent.
#[derive(Clone, Debug)]
pub struct InteractiveAdjustmentEngine<T> {
    config: AdjustmentConfig,
    store: ParameterStore<T>,
    sessions: BTreeMap<Phase, DragSession<T>>,
}

impl<T> Default for InteractiveAdjustmentEngine<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new(AdjustmentConfig::default())
    }
}

impl<T> InteractiveAdjustmentEngine<T>
where
    T: Float,
{
    pub fn new(config: AdjustmentConfig) -> Self {
        Self {
            config,
            store: ParameterStore::new(),
            sessions: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &AdjustmentConfig {
        &self.config
    }

    pub fn store(&self) -> &ParameterStore<T> {
        &self.store
    }

    pub fn params(&self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.store.get(phase)
    }

    pub fn session(&self, phase: Phase) -> Option<&DragSession<T>> {
        self.sessions.get(&phase)
    }

    pub fn is_dragging(&self, phase: Phase) -> bool {
        self.sessions.contains_key(&phase)
    }

    pub fn is_auto_fit(&self, phase: Phase) -> bool {
        self.store.is_auto_fit(phase)
    }

    /// Store automatically fitted parameters, ignored for phases with auto-fit disabled
    pub fn set_fitted(&mut self, phase: Phase, params: DeclineParameters<T>) -> bool {
        self.store.set_fitted(phase, params)
    }

    /// Begin a gesture on `phase`
    pub fn start(
        &mut self,
        phase: Phase,
        modifier: Modifier,
        pointer: PointerSample<T>,
    ) -> Result<(), AdjustmentError> {
        let origin = self
            .store
            .get(phase)
            .ok_or(AdjustmentError::UnknownPhase(phase))?;
        if self.sessions.contains_key(&phase) {
            return Err(AdjustmentError::SessionActive(phase));
        }
        let session = DragSession::new(modifier, origin, pointer, &self.config);
        tracing::debug!(%phase, target = ?session.target, "drag started");
        self.store.disable_auto_fit(phase);
        self.sessions.insert(phase, session);
        Ok(())
    }

    /// Move the pointer of the active gesture, returns the new parameters of `phase`
    pub fn update(
        &mut self,
        phase: Phase,
        pointer: PointerSample<T>,
    ) -> Result<DeclineParameters<T>, AdjustmentError> {
        let session = self
            .sessions
            .get(&phase)
            .ok_or(AdjustmentError::NoActiveSession(phase))?;
        let params = session.params_at(&pointer, &self.config);
        tracing::trace!(
            %phase,
            qi = params.qi.value_into_f64(),
            b = params.b.value_into_f64(),
            d = params.d.value_into_f64(),
            "drag update"
        );
        self.store.set(phase, params);
        Ok(params)
    }

    /// Finish the gesture, the last computed parameters stay in place
    pub fn end(&mut self, phase: Phase) -> Result<DeclineParameters<T>, AdjustmentError> {
        self.sessions
            .remove(&phase)
            .ok_or(AdjustmentError::NoActiveSession(phase))?;
        tracing::debug!(%phase, "drag ended");
        self.store
            .get(phase)
            .ok_or(AdjustmentError::UnknownPhase(phase))
    }

    /// Modifier key released: finishes a gesture started with a modifier
    ///
    /// Returns `true` if a session was finished.
    pub fn modifier_released(&mut self, phase: Phase) -> bool {
        let started_with_modifier = self
            .sessions
            .get(&phase)
            .is_some_and(|session| session.modifier != Modifier::None);
        if started_with_modifier {
            self.sessions.remove(&phase);
            tracing::debug!(%phase, "drag ended by modifier release");
        }
        started_with_modifier
    }

    /// Re-enable auto-fit of `phase`, an active gesture is finished
    pub fn reset_auto_fit(&mut self, phase: Phase) {
        self.sessions.remove(&phase);
        self.store.enable_auto_fit(phase);
    }

    /// Forget `phase`: parameters, gesture and auto-fit flag
    pub fn remove_phase(&mut self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.sessions.remove(&phase);
        self.store.remove(phase)
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
        self.store.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn engine() -> InteractiveAdjustmentEngine<f64> {
        let mut engine = InteractiveAdjustmentEngine::default();
        assert!(engine.set_fitted(Phase::Oil, DeclineParameters::new(1000.0, 0.5, 0.05)));
        assert!(engine.set_fitted(Phase::Gas, DeclineParameters::new(5000.0, 0.3, 0.02)));
        engine
    }

    #[test]
    fn gesture_lifecycle() {
        let mut engine = engine();
        engine
            .start(Phase::Oil, Modifier::None, PointerSample::new(100.0, 0.0))
            .unwrap();
        assert!(engine.is_dragging(Phase::Oil));
        assert!(!engine.is_auto_fit(Phase::Oil));

        let params = engine
            .update(Phase::Oil, PointerSample::new(120.0, 0.0))
            .unwrap();
        assert_relative_eq!(params.qi, 1100.0, max_relative = 1e-12);
        assert_eq!(engine.params(Phase::Oil), Some(params));

        let last = engine.end(Phase::Oil).unwrap();
        assert_eq!(last, params);
        assert!(!engine.is_dragging(Phase::Oil));
        assert_eq!(engine.params(Phase::Oil), Some(params));

        // auto-fit stays off after the gesture
        assert!(!engine.set_fitted(Phase::Oil, DeclineParameters::fallback()));
        assert_eq!(engine.params(Phase::Oil), Some(params));
    }

    #[test]
    fn round_trip_restores_snapshot() {
        let mut engine = engine();
        let origin = engine.params(Phase::Gas).unwrap();
        let start = PointerSample::new(300.0, 0.0);
        engine.start(Phase::Gas, Modifier::Decline, start).unwrap();
        for offset in [310.0, 250.0, 100.0, 299.0] {
            engine
                .update(Phase::Gas, PointerSample::new(offset, 0.0))
                .unwrap();
        }
        assert_eq!(engine.update(Phase::Gas, start), Ok(origin));
        engine.end(Phase::Gas).unwrap();
        assert_eq!(engine.params(Phase::Gas), Some(origin));
    }

    #[test]
    fn protocol_errors() {
        let mut engine = engine();
        let pointer = PointerSample::new(0.0, 0.0);
        assert_eq!(
            engine.start(Phase::Water, Modifier::None, pointer),
            Err(AdjustmentError::UnknownPhase(Phase::Water))
        );
        assert_eq!(
            engine.update(Phase::Oil, pointer),
            Err(AdjustmentError::NoActiveSession(Phase::Oil))
        );
        assert_eq!(
            engine.end(Phase::Oil),
            Err(AdjustmentError::NoActiveSession(Phase::Oil))
        );
        engine.start(Phase::Oil, Modifier::None, pointer).unwrap();
        assert_eq!(
            engine.start(Phase::Oil, Modifier::Exponent, pointer),
            Err(AdjustmentError::SessionActive(Phase::Oil))
        );
    }

    #[test]
    fn phases_are_independent() {
        let mut engine = engine();
        let gas = engine.params(Phase::Gas).unwrap();
        engine
            .start(Phase::Oil, Modifier::Exponent, PointerSample::new(0.0, 0.0))
            .unwrap();
        engine
            .start(Phase::Gas, Modifier::None, PointerSample::new(0.0, 0.0))
            .unwrap();
        let oil = engine
            .update(Phase::Oil, PointerSample::new(-50.0, 0.0))
            .unwrap();
        assert_relative_eq!(oil.b, 0.6, max_relative = 1e-12);
        assert_eq!(engine.params(Phase::Gas), Some(gas));
        engine.end(Phase::Gas).unwrap();
        assert!(engine.is_dragging(Phase::Oil));
    }

    #[test]
    fn modifier_release_ends_only_modified_gestures() {
        let mut engine = engine();
        let pointer = PointerSample::new(0.0, 0.0);
        engine.start(Phase::Oil, Modifier::Decline, pointer).unwrap();
        engine.start(Phase::Gas, Modifier::None, pointer).unwrap();

        assert!(engine.modifier_released(Phase::Oil));
        assert!(!engine.is_dragging(Phase::Oil));
        assert!(!engine.modifier_released(Phase::Gas));
        assert!(engine.is_dragging(Phase::Gas));
        assert!(!engine.modifier_released(Phase::Water));
    }

    #[test]
    fn reset_and_remove() {
        let mut engine = engine();
        engine
            .start(Phase::Oil, Modifier::None, PointerSample::new(0.0, 0.0))
            .unwrap();
        engine.reset_auto_fit(Phase::Oil);
        assert!(engine.is_auto_fit(Phase::Oil));
        assert!(!engine.is_dragging(Phase::Oil));
        assert!(engine.set_fitted(Phase::Oil, DeclineParameters::fallback()));

        engine
            .start(Phase::Gas, Modifier::None, PointerSample::new(0.0, 0.0))
            .unwrap();
        assert!(engine.remove_phase(Phase::Gas).is_some());
        assert!(!engine.is_dragging(Phase::Gas));
        assert!(engine.is_auto_fit(Phase::Gas));
        assert_eq!(engine.params(Phase::Gas), None);

        engine.clear();
        assert!(engine.store().is_empty());
    }
}
