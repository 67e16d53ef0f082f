//! `ParameterSchedule` — parameter changes keyed by the tick they take effect.

use std::collections::BTreeMap;

use serde_json::Value;

use gs_core::Tick;
use gs_params::Parameters;

/// One scheduled change.
#[derive(Clone, Debug)]
pub enum ParameterUpdate {
    /// Replace the whole snapshot.
    Snapshot(Parameters),
    /// Apply a (partial) parameter document on top of the current snapshot.
    Document(Value),
}

/// Sparse map `Tick → [updates]`.  Updates due at tick `t` are applied
/// before `t` runs, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ParameterSchedule {
    inner: BTreeMap<Tick, Vec<ParameterUpdate>>,
}

impl ParameterSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: Tick, update: ParameterUpdate) {
        self.inner.entry(at).or_default().push(update);
    }

    /// Builder-style [`push`](Self::push) of a full snapshot.
    pub fn snapshot_at(mut self, at: Tick, params: Parameters) -> Self {
        self.push(at, ParameterUpdate::Snapshot(params));
        self
    }

    /// Builder-style [`push`](Self::push) of a parameter document.
    pub fn document_at(mut self, at: Tick, doc: Value) -> Self {
        self.push(at, ParameterUpdate::Document(doc));
        self
    }

    /// Remove and return every update due at or before `now`, oldest first.
    pub fn drain_due(&mut self, now: Tick) -> Vec<ParameterUpdate> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        due.into_values().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }
}
