use crate::ingredient::TABLE;

pub const SINGLE_INGREDIENT_CAP_SOLO: i32 = 12;
pub const SINGLE_INGREDIENT_CAP_GROUP: i32 = 15;

/// dense multiset of ingredient counts over the full ingredient table.
/// identity is the count vector itself: two recipes with identical counts are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    counts: Vec<u16>,
}

impl Recipe {
    pub fn empty() -> Recipe {
        Recipe {
            counts: vec![0; TABLE.len()],
        }
    }

    pub fn from_counts(counts: Vec<u16>) -> Recipe {
        debug_assert_eq!(counts.len(), TABLE.len());
        Recipe { counts }
    }

    pub fn as_counts(&self) -> &[u16] {
        &self.counts
    }

    pub fn count(&self, i: usize) -> u16 {
        self.counts[i]
    }

    pub fn add(&mut self, i: usize) {
        self.counts[i] += 1;
    }

    /// canonical key for duplicate suppression
    pub fn canonical_key(&self) -> Vec<u16> {
        self.counts.clone()
    }

    pub fn num_condiments(&self) -> i32 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| TABLE.get(*i).is_condiment)
            .map(|(_, &c)| c as i32)
            .sum()
    }

    pub fn num_fillings(&self) -> i32 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| TABLE.get(*i).is_filling())
            .map(|(_, &c)| c as i32)
            .sum()
    }

    pub fn num_herba_mystica(&self) -> i32 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| TABLE.get(*i).is_herba_mystica)
            .map(|(_, &c)| c as i32)
            .sum()
    }

    pub fn total_pieces(&self) -> i32 {
        self.counts
            .iter()
            .enumerate()
            .filter(|(i, _)| TABLE.get(*i).is_filling())
            .map(|(i, &c)| c as i32 * TABLE.get(i).pieces)
            .sum()
    }

    pub fn is_legal(&self, num_players: i32) -> bool {
        let fillings = self.num_fillings();
        let condiments = self.num_condiments();
        let cap = if num_players <= 1 {
            SINGLE_INGREDIENT_CAP_SOLO
        } else {
            SINGLE_INGREDIENT_CAP_GROUP
        };

        let fillings_ok = fillings >= num_players && fillings <= 6 * num_players;
        let condiments_ok = condiments >= num_players && condiments <= 4 * num_players;
        let per_ingredient_ok = self
            .counts
            .iter()
            .enumerate()
            .filter(|(i, _)| TABLE.get(*i).is_filling())
            .all(|(i, &c)| c as i32 * TABLE.get(i).pieces <= cap);

        fillings_ok && condiments_ok && per_ingredient_ok
    }

    /// ingredient indices with a non-zero count, in table order
    pub fn ingredient_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, _)| i)
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredient_indices().map(|i| TABLE.name(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_counts() {
        let mut r = Recipe::empty();
        let idx = TABLE.index_of("Rice").unwrap();
        r.add(idx);
        r.add(idx);
        let restored = Recipe::from_counts(r.as_counts().to_vec());
        assert_eq!(r, restored);
    }

    #[test]
    fn order_independence() {
        let a_idx = TABLE.index_of("Rice").unwrap();
        let b_idx = TABLE.index_of("Ketchup").unwrap();

        let mut first = Recipe::empty();
        first.add(a_idx);
        first.add(b_idx);

        let mut second = Recipe::empty();
        second.add(b_idx);
        second.add(a_idx);

        assert_eq!(first, second);
    }

    #[test]
    fn legality_bounds() {
        let mut r = Recipe::empty();
        assert!(!r.is_legal(1));
        let rice = TABLE.index_of("Rice").unwrap();
        let ketchup = TABLE.index_of("Ketchup").unwrap();
        r.add(rice);
        r.add(ketchup);
        assert!(r.is_legal(1));
    }
}
