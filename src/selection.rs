use rand::Rng;
use rand::seq::SliceRandom;

/// Ordering strategy for candidate lists (venues, days, slots, the initial
/// course list). The engine consults this everywhere it needs a tie-break,
/// so swapping the strategy makes an entire run deterministic.
pub trait SelectionOrder {
    fn permute<T>(&mut self, items: &mut [T]);
}

/// Production strategy: a uniform shuffle driven by any `rand` generator.
/// Seed the generator to reproduce a run exactly.
pub struct RngOrder<R: Rng> {
    rng: R,
}

impl<R: Rng> RngOrder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SelectionOrder for RngOrder<R> {
    fn permute<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Test stub: leaves every candidate list in its given order.
#[cfg(test)]
pub struct FixedOrder;

#[cfg(test)]
impl SelectionOrder for FixedOrder {
    fn permute<T>(&mut self, _items: &mut [T]) {}
}
