//! Filter from an arbitrary closure.
//!
//! Used for view-specific toggles that don't fit the text/enum/date
//! shapes, such as "low stock only".

use crate::traits::Filter;

pub struct PredicateFilter<T> {
    name: String,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> PredicateFilter<T> {
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl<T> Filter<T> for PredicateFilter<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}
