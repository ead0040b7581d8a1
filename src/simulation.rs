pub trait Simulate: Sized {
    type Value;

    /// Value observed during `cycle`; advances the state to the next cycle.
    fn next(&mut self, cycle: u64) -> Self::Value;

    fn simulate(self) -> Values<Self> {
        Values {
            cycle: 0,
            source: self,
        }
    }
}

#[derive(Debug)]
pub struct Values<S> {
    cycle: u64,
    source: S,
}

impl<S: Simulate> Values<S> {
    pub fn next_cycle(&mut self) -> S::Value {
        let value = self.source.next(self.cycle);
        self.cycle += 1;
        value
    }

    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

impl<S: Simulate> Iterator for Values<S> {
    type Item = S::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_cycle())
    }
}
