use crate::enums::{Flavor, Power, Type};
use crate::error::PicnicError;
use lazy_static::lazy_static;
use std::collections::HashMap;

const RAW_CSV: &str = include_str!("../../data/ingredients.csv");

/// one row of the static ingredient dataset. never mutated after load.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub name: String,
    pub pieces: i32,
    pub is_condiment: bool,
    pub is_herba_mystica: bool,
    pub flavor: [i32; Flavor::COUNT],
    pub power: [i32; Power::COUNT],
    pub pokemon_type: [i32; Type::COUNT],
}

impl Ingredient {
    pub fn is_filling(&self) -> bool {
        !self.is_condiment
    }
}

/// immutable, shared-by-index reference table loaded once from `data/ingredients.csv`
pub struct IngredientTable {
    rows: Vec<Ingredient>,
    by_name: HashMap<String, usize>,
}

impl IngredientTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, i: usize) -> &Ingredient {
        &self.rows[i]
    }

    pub fn name(&self, i: usize) -> &str {
        &self.rows[i].name
    }

    pub fn index_of(&self, name: &str) -> Result<usize, PicnicError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| PicnicError::UnknownIngredient(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Ingredient)> {
        self.rows.iter().enumerate()
    }

    pub fn condiments(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_condiment)
            .map(|(i, _)| i)
    }

    pub fn fillings(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_filling())
            .map(|(i, _)| i)
    }

    pub fn herba_mystica(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_herba_mystica)
            .map(|(i, _)| i)
    }

    fn load(raw: &str) -> IngredientTable {
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let headers = reader.headers().expect("embedded ingredient csv header").clone();
        let col = |name: &str| -> usize {
            headers
                .iter()
                .position(|h| h == name)
                .unwrap_or_else(|| panic!("ingredient csv missing column {name}"))
        };

        let pieces_col = col("pieces");
        let condiment_col = col("is_condiment");
        let hm_col = col("is_herba_mystica");
        let flavor_cols: Vec<usize> = Flavor::ALL.iter().map(|f| col(f.name())).collect();
        let power_cols: Vec<usize> = Power::ALL.iter().map(|p| col(p.name())).collect();
        let type_cols: Vec<usize> = Type::ALL.iter().map(|t| col(t.name())).collect();

        let mut rows = Vec::new();
        let mut by_name = HashMap::new();

        for record in reader.records() {
            let record = record.expect("embedded ingredient csv row");
            let name = record[0].to_string();

            let mut flavor = [0i32; Flavor::COUNT];
            for (slot, &c) in flavor_cols.iter().enumerate() {
                flavor[slot] = record[c].parse().unwrap_or(0);
            }
            let mut power = [0i32; Power::COUNT];
            for (slot, &c) in power_cols.iter().enumerate() {
                power[slot] = record[c].parse().unwrap_or(0);
            }
            let mut pokemon_type = [0i32; Type::COUNT];
            for (slot, &c) in type_cols.iter().enumerate() {
                pokemon_type[slot] = record[c].parse().unwrap_or(0);
            }

            by_name.insert(name.clone(), rows.len());
            rows.push(Ingredient {
                name,
                pieces: record[pieces_col].parse().unwrap_or(1),
                is_condiment: &record[condiment_col] == "true",
                is_herba_mystica: &record[hm_col] == "true",
                flavor,
                power,
                pokemon_type,
            });
        }

        IngredientTable { rows, by_name }
    }
}

lazy_static! {
    pub static ref TABLE: IngredientTable = IngredientTable::load(RAW_CSV);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_rows() {
        assert!(TABLE.len() > 0);
        assert!(TABLE.index_of("Rice").is_ok());
    }

    #[test]
    fn unknown_ingredient_errors() {
        assert!(matches!(
            TABLE.index_of("Not A Real Ingredient"),
            Err(PicnicError::UnknownIngredient(_))
        ));
    }

    #[test]
    fn herba_mystica_flagged() {
        let i = TABLE.index_of("Bitter Herba Mystica").unwrap();
        assert!(TABLE.get(i).is_herba_mystica);
        assert!(TABLE.get(i).is_condiment);
    }

    #[test]
    fn rice_is_filling_not_condiment() {
        let i = TABLE.index_of("Rice").unwrap();
        assert!(TABLE.get(i).is_filling());
    }
}
