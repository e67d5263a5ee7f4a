use crate::data::Phase;
use crate::decline::DeclineParameters;
use crate::float_trait::Float;

use std::collections::{BTreeMap, BTreeSet};

/// Current decline parameters of every phase together with its auto-fit flag
///
/// Auto-fit is enabled for every phase until [ParameterStore::disable_auto_fit] is called, and
/// stays disabled until [ParameterStore::enable_auto_fit] or [ParameterStore::remove].
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterStore<T> {
    params: BTreeMap<Phase, DeclineParameters<T>>,
    manual: BTreeSet<Phase>,
}

impl<T> Default for ParameterStore<T> {
    fn default() -> Self {
        Self {
            params: BTreeMap::new(),
            manual: BTreeSet::new(),
        }
    }
}

impl<T> ParameterStore<T>
where
    T: Float,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.params.get(&phase).copied()
    }

    pub fn contains(&self, phase: Phase) -> bool {
        self.params.contains_key(&phase)
    }

    /// Store parameters regardless of the auto-fit flag, returns the previous ones
    pub fn set(
        &mut self,
        phase: Phase,
        params: DeclineParameters<T>,
    ) -> Option<DeclineParameters<T>> {
        self.params.insert(phase, params)
    }

    /// Store automatically fitted parameters if auto-fit is enabled for `phase`
    ///
    /// Returns `true` if the parameters were stored.
    pub fn set_fitted(&mut self, phase: Phase, params: DeclineParameters<T>) -> bool {
        if self.is_auto_fit(phase) {
            self.params.insert(phase, params);
            true
        } else {
            false
        }
    }

    /// Drop the parameters of `phase` and re-enable its auto-fit
    pub fn remove(&mut self, phase: Phase) -> Option<DeclineParameters<T>> {
        self.manual.remove(&phase);
        self.params.remove(&phase)
    }

    pub fn is_auto_fit(&self, phase: Phase) -> bool {
        !self.manual.contains(&phase)
    }

    pub fn disable_auto_fit(&mut self, phase: Phase) {
        self.manual.insert(phase);
    }

    pub fn enable_auto_fit(&mut self, phase: Phase) {
        self.manual.remove(&phase);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, DeclineParameters<T>)> + '_ {
        self.params.iter().map(|(&phase, &params)| (phase, params))
    }

    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.params.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.manual.clear();
    }
}
