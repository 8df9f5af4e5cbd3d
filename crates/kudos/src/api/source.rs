use std::cell::Cell;
use std::rc::Rc;

/// Authoritative count of earned stars, read whenever the registry is rebuilt.
pub trait AwardSource {
    fn award_count(&self) -> i64;
}

/// Shared, host-writable award count. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct SharedAwardCount(Rc<Cell<i64>>);

impl SharedAwardCount {
    pub fn new(count: i64) -> Self {
        Self(Rc::new(Cell::new(count)))
    }

    pub fn set(&self, count: i64) {
        self.0.set(count);
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }
}

impl AwardSource for SharedAwardCount {
    fn award_count(&self) -> i64 {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_count() {
        let count = SharedAwardCount::new(2);
        let source: Box<dyn AwardSource> = Box::new(count.clone());
        count.set(9);
        assert_eq!(source.award_count(), 9);
    }
}
