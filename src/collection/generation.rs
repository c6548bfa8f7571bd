//! Request-generation tokens for latest-wins async lookups

/// Identifies one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(u64);

/// Counter of issued lookups of one kind.
///
/// Each new lookup takes a fresh token; a result may only be applied while
/// its token is still the latest one issued.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    latest: u64,
}

impl RequestGeneration {
    pub fn issue(&mut self) -> GenerationToken {
        self.latest += 1;
        GenerationToken(self.latest)
    }

    pub fn is_current(&self, token: GenerationToken) -> bool {
        token.0 == self.latest
    }

    /// Make every outstanding token stale without issuing a new lookup
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
