use crate::piece::{Kind, KIND_COUNT};

/// Spawn counters per piece kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    counts: [u32; KIND_COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: Kind) {
        self.counts[kind.index()] += 1;
    }

    pub fn count(&self, kind: Kind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Kind, u32)> + '_ {
        Kind::ALL.iter().map(|&kind| (kind, self.count(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_kind() {
        let mut stats = Statistics::new();
        stats.record(Kind::T);
        stats.record(Kind::T);
        stats.record(Kind::I);
        assert_eq!(stats.count(Kind::T), 2);
        assert_eq!(stats.count(Kind::I), 1);
        assert_eq!(stats.count(Kind::Z), 0);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.iter().count(), KIND_COUNT);
    }
}
