use crate::domain::Suggestion;

/// Hits for one issued lookup, tagged with its sequence number.
#[derive(Debug, Clone)]
pub struct SequencedSuggestions {
    pub seq: u64,
    pub hits: Vec<Suggestion>,
}

/// Orders suggestion lookups so only the most recently issued one is applied.
///
/// Lookups run concurrently and may resolve out of order; a response is kept
/// only if no lookup was issued (or the sequence invalidated) after it.
#[derive(Debug, Default)]
pub struct LookupSequencer {
    latest: u64,
}

impl LookupSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the sequence number for a new lookup.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Drop every lookup still in flight, e.g. after a message was sent.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Return the hits if they answer the latest lookup.
    pub fn accept(&self, response: SequencedSuggestions) -> Option<Vec<Suggestion>> {
        self.is_current(response.seq).then_some(response.hits)
    }
}
