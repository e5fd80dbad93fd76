use crate::error::PicnicError;

/// ordinal order is observable: it breaks ties in every sort the evaluator performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flavor {
    Sweet = 0,
    Salty = 1,
    Sour = 2,
    Bitter = 3,
    Hot = 4,
}

impl Flavor {
    pub const COUNT: usize = 5;
    pub const ALL: [Flavor; 5] = [
        Flavor::Sweet,
        Flavor::Salty,
        Flavor::Sour,
        Flavor::Bitter,
        Flavor::Hot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Flavor::Sweet => "sweet",
            Flavor::Salty => "salty",
            Flavor::Sour => "sour",
            Flavor::Bitter => "bitter",
            Flavor::Hot => "hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Power {
    Egg = 0,
    Catching = 1,
    ExpPoint = 2,
    ItemDrop = 3,
    Raid = 4,
    Sparkling = 5,
    Title = 6,
    Humungo = 7,
    Teensy = 8,
    Encounter = 9,
}

impl Power {
    pub const COUNT: usize = 10;
    pub const ALL: [Power; 10] = [
        Power::Egg,
        Power::Catching,
        Power::ExpPoint,
        Power::ItemDrop,
        Power::Raid,
        Power::Sparkling,
        Power::Title,
        Power::Humungo,
        Power::Teensy,
        Power::Encounter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Power::Egg => "egg",
            Power::Catching => "catching",
            Power::ExpPoint => "exp_point",
            Power::ItemDrop => "item_drop",
            Power::Raid => "raid",
            Power::Sparkling => "sparkling",
            Power::Title => "title",
            Power::Humungo => "humungo",
            Power::Teensy => "teensy",
            Power::Encounter => "encounter",
        }
    }

    pub fn parse(s: &str) -> Result<Power, PicnicError> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PicnicError::UnknownPower(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
}

impl Type {
    pub const COUNT: usize = 18;
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Fairy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fighting => "fighting",
            Type::Flying => "flying",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Rock => "rock",
            Type::Bug => "bug",
            Type::Ghost => "ghost",
            Type::Steel => "steel",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Grass => "grass",
            Type::Electric => "electric",
            Type::Psychic => "psychic",
            Type::Ice => "ice",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Fairy => "fairy",
        }
    }

    pub fn parse(s: &str) -> Result<Type, PicnicError> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PicnicError::UnknownType(s.to_string()))
    }
}
