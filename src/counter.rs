#[derive(Debug, Clone, PartialEq)]
pub struct InstanceCounter {
    weight: f64,
    count: f64,
}

impl InstanceCounter {
    pub fn new(weight: f64) -> Self {
        Self::with_count(weight, 0.)
    }

    pub fn with_count(weight: f64, count: f64) -> Self {
        Self { weight, count }
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn set_count(&mut self, count: f64) -> f64 {
        self.count = count;
        self.count
    }

    pub fn add_count(&mut self, delta: f64) -> f64 {
        self.count += delta;
        self.count
    }

    pub fn incr_count(&mut self) -> f64 {
        self.add_count(1.)
    }

    pub fn footprint(&self) -> f64 {
        self.count * self.weight
    }

    /// Back-solves the count so the weight is preserved, i.e. afterwards
    /// `count() == footprint / weight`. The weight must be nonzero.
    pub fn set_footprint(&mut self, footprint: f64) -> f64 {
        self.count = footprint / self.weight;
        footprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        let mut counter = InstanceCounter::with_count(0.5, 1.);
        assert_eq!(counter.count(), 1.);
        assert_eq!(counter.set_count(2.), 2.);
        assert_eq!(counter.count(), 2.);
        assert_eq!(counter.add_count(3.), 5.);
        assert_eq!(counter.count(), 5.);
        assert_eq!(counter.incr_count(), 6.);
        assert_eq!(counter.count(), 6.);
        assert_eq!(counter.footprint(), 3.);
        assert_eq!(counter.set_footprint(10.), 10.);
        assert_eq!(counter.footprint(), 10.);
        assert_eq!(counter.count(), 20.);

        let counter = InstanceCounter::new(0.5);
        assert_eq!(counter.count(), 0.)
    }

    #[test]
    fn negative_counts_pass_through() {
        let mut counter = InstanceCounter::new(4.);
        assert_eq!(counter.add_count(-3.), -3.);
        assert_eq!(counter.footprint(), -12.)
    }

    #[test]
    fn footprint_tracks_count() {
        arbtest::arbtest(|u| {
            let weight = [0.25, 0.5, 1., 2., 4., 8.][u.choose_index(6)?];
            let mut counter = InstanceCounter::new(weight);
            for _ in 0..u.arbitrary_len::<u8>()? {
                match u.int_in_range(0..=3)? {
                    0 => counter.set_count(u.int_in_range(-100..=100)? as f64),
                    1 => counter.add_count(u.int_in_range(-100..=100)? as f64),
                    2 => counter.incr_count(),
                    _ => counter.set_footprint(u.int_in_range(-100..=100)? as f64 * weight),
                };
                assert_eq!(counter.footprint(), counter.count() * weight)
            }
            Ok(())
        });
    }
}
