//! Merge event sink.

/// A single merge performed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeEvent {
    /// Surviving (lower) index.
    pub i: usize,
    /// Absorbed (higher) index.
    pub j: usize,
    /// Dissimilarity between `i` and `j` at the moment they merged.
    pub distance: f64,
}

impl MergeEvent {
    /// Create an event, normalizing so that `i < j`.
    pub fn new(a: usize, b: usize, distance: f64) -> Self {
        let (i, j) = if a <= b { (a, b) } else { (b, a) };
        Self { i, j, distance }
    }
}

/// Trait for consumers of the merge sequence produced by a clustering run.
pub trait MergeRecorder {
    /// Called once per merge, in order.
    fn record(&mut self, event: MergeEvent);
}

impl MergeRecorder for Vec<MergeEvent> {
    fn record(&mut self, event: MergeEvent) {
        self.push(event);
    }
}
