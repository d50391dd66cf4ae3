use cdcfifo_dsa::Side;

/// Interleaves the steps of two free-running domains.
///
/// Periods and phases are in arbitrary, shared time units. Each item is the
/// time of an edge and the domain it belongs to. Coincident edges are
/// yielded producer first; any fixed tie-break is valid because neither
/// domain observes the other within a step.
#[derive(Clone, Debug)]
pub struct DualClock {
    write_period: u64,
    read_period: u64,
    next_write: u64,
    next_read: u64,
}

impl DualClock {
    pub fn new(write_period: u64, read_period: u64) -> Self {
        assert!(write_period > 0 && read_period > 0, "clock periods must be non-zero");
        Self {
            write_period,
            read_period,
            next_write: 0,
            next_read: 0,
        }
    }

    /// Delays the first edge of each domain.
    pub fn with_phase(mut self, write_offset: u64, read_offset: u64) -> Self {
        self.next_write = write_offset;
        self.next_read = read_offset;
        self
    }

    pub fn periods(&self) -> (u64, u64) {
        (self.write_period, self.read_period)
    }
}

impl Iterator for DualClock {
    type Item = (u64, Side);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_write <= self.next_read {
            let at = self.next_write;
            self.next_write += self.write_period;
            Some((at, Side::Write))
        } else {
            let at = self.next_read;
            self.next_read += self.read_period;
            Some((at, Side::Read))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaving_follows_periods() {
        let sides: Vec<Side> = DualClock::new(2, 3).take(6).map(|(_, s)| s).collect();
        // t=0 W, t=0 R, t=2 W, t=3 R, t=4 W, t=6 W
        assert_eq!(sides, [Side::Write, Side::Read, Side::Write, Side::Read, Side::Write, Side::Write]);
    }

    #[test]
    fn test_phase_offsets() {
        let first = DualClock::new(5, 5).with_phase(3, 0).next();
        assert_eq!(first, Some((0, Side::Read)));
    }
}
