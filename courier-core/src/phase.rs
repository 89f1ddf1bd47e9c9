//! Dispatch phase tag.

use std::fmt;

/// How far a dispatcher has been driven.
///
/// Purely diagnostic: nothing is refused based on the phase. The tag only
/// moves forward, so coordinating after processing stays `Processed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    /// Handler built, no phase invoked yet.
    #[default]
    Constructed,
    /// `coordinate` has been invoked at least once.
    Coordinated,
    /// `process` has been invoked.
    Processed,
}

impl Phase {
    /// The later of `self` and `next`.
    pub fn advance(self, next: Phase) -> Phase {
        self.max(next)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Constructed => "constructed",
            Phase::Coordinated => "coordinated",
            Phase::Processed => "processed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_never_moves_back() {
        let phase = Phase::default();
        assert_eq!(phase, Phase::Constructed);

        let phase = phase.advance(Phase::Coordinated);
        assert_eq!(phase, Phase::Coordinated);

        let phase = phase.advance(Phase::Processed);
        assert_eq!(phase.advance(Phase::Coordinated), Phase::Processed);
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Coordinated.to_string(), "coordinated");
    }
}
