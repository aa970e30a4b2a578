use crate::filter::{Filterable, filter};

/// Cached copy of a server-owned collection plus the view the current
/// criteria select from it. The collection is only ever replaced whole.
pub struct EntityListStore<T: Filterable> {
    items: Vec<T>,
    criteria: T::Criteria,
    visible: Vec<T>,
    loaded: bool,
}

impl<T> Default for EntityListStore<T>
where
    T: Filterable + Clone,
{
    fn default() -> Self {
        Self {
            items: Vec::new(),
            criteria: T::Criteria::default(),
            visible: Vec::new(),
            loaded: false,
        }
    }
}

impl<T> EntityListStore<T>
where
    T: Filterable + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        self.refilter();
    }

    pub fn set_criteria(&mut self, criteria: T::Criteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn criteria(&self) -> &T::Criteria {
        &self.criteria
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// Whether at least one fetch has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    fn refilter(&mut self) {
        self.visible = filter(&self.items, &self.criteria);
    }
}
