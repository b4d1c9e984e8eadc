use crate::entity::Related;

/// Related values materialized for one instance, keyed by root field
///
/// Entries keep the order their first path was applied in. Paths sharing a
/// first step share one entry.
#[derive(Debug, Default)]
pub struct IncludedValues {
    entries: Vec<(&'static str, Related)>,
}

impl IncludedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == field)
    }

    pub fn get(&self, field: &str) -> Option<&Related> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, related)| related)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Related> {
        self.entries
            .iter_mut()
            .find(|(name, _)| *name == field)
            .map(|(_, related)| related)
    }

    /// Entry for `field`, created with `make` when missing
    pub fn get_or_try_insert_with<F, E>(&mut self, field: &'static str, make: F) -> Result<&mut Related, E>
    where
        F: FnOnce() -> Result<Related, E>,
    {
        let index = match self.entries.iter().position(|(name, _)| *name == field) {
            Some(index) => index,
            None => {
                self.entries.push((field, make()?));
                self.entries.len() - 1
            }
        };
        Ok(&mut self.entries[index].1)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl IntoIterator for IncludedValues {
    type Item = (&'static str, Related);
    type IntoIter = std::vec::IntoIter<(&'static str, Related)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
