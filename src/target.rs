use crate::enums::{Power, Type};
use crate::error::{PicnicError, TargetsError};
use crate::evaluate::Effect;

/// a single desired (Power, Type) pair; Egg is typeless
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub power: Power,
    pub pokemon_type: Option<Type>,
}

/// a validated, ordered collection of 1-3 distinct targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    targets: Vec<Target>,
}

impl TargetSet {
    /// validate and wrap a list of targets per the invariants in the data model.
    /// `strict_type_sharing` controls the single-player open question: when true,
    /// three same-typed non-egg targets are rejected unless sparkling is present.
    pub fn new(targets: Vec<Target>, strict_type_sharing: bool) -> Result<TargetSet, PicnicError> {
        if targets.is_empty() || targets.len() > 3 {
            return Err(TargetsError::TargetCountOutOfRange(targets.len()).into());
        }

        let mut powers_seen = Vec::new();
        for t in &targets {
            if powers_seen.contains(&t.power) {
                return Err(TargetsError::RepeatedPower.into());
            }
            powers_seen.push(t.power);

            match (t.power, t.pokemon_type) {
                (Power::Egg, Some(_)) => return Err(TargetsError::TypedEgg.into()),
                (Power::Egg, None) => {}
                (_, None) => return Err(TargetsError::UntypedNonEgg.into()),
                (_, Some(_)) => {}
            }
        }

        let has_sparkling = powers_seen.contains(&Power::Sparkling);
        let has_title = powers_seen.contains(&Power::Title);
        let non_egg_types: Vec<Type> = targets
            .iter()
            .filter(|t| t.power != Power::Egg)
            .filter_map(|t| t.pokemon_type)
            .collect();
        let shared_type = non_egg_types
            .iter()
            .all(|t| Some(*t) == non_egg_types.first().copied());

        if has_sparkling {
            if !has_title {
                return Err(TargetsError::SparklingWithoutTitle.into());
            }
            if !non_egg_types.is_empty() && !shared_type {
                return Err(TargetsError::SparklingTypeMismatch.into());
            }
        }

        if strict_type_sharing
            && targets.len() == 3
            && !powers_seen.contains(&Power::Egg)
            && non_egg_types.len() == 3
            && shared_type
            && !has_sparkling
        {
            return Err(TargetsError::UnreachableTypeSharing.into());
        }

        Ok(TargetSet { targets })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn has_power(&self, power: Power) -> bool {
        self.targets.iter().any(|t| t.power == power)
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.targets.iter().any(|tg| tg.pokemon_type == Some(t))
    }

    /// indices (into `targets()`) of targets whose (Power, Type) is present in `effects`
    pub fn matches(&self, effects: &[Effect; 3]) -> Vec<usize> {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                effects
                    .iter()
                    .any(|e| e.power == t.power && (t.power == Power::Egg || e.pokemon_type == t.pokemon_type))
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn serialize(&self) -> Vec<String> {
        self.targets
            .iter()
            .map(|t| match t.pokemon_type {
                Some(ty) => format!("{},{}", t.power.name(), ty.name()),
                None => t.power.name().to_string(),
            })
            .collect()
    }
}

/// parse user-supplied `<power>` or `<power>,<type>` strings into a validated TargetSet
pub fn parse_targets(items: &[String], strict_type_sharing: bool) -> Result<TargetSet, PicnicError> {
    let mut targets = Vec::with_capacity(items.len());
    for item in items {
        let mut parts = item.splitn(2, ',');
        let power_str = parts
            .next()
            .ok_or_else(|| PicnicError::MalformedTargetString(item.clone()))?
            .trim();
        let type_str = parts.next().map(str::trim);

        if power_str.is_empty() {
            return Err(PicnicError::MalformedTargetString(item.clone()));
        }

        let power = Power::parse(power_str)?;
        let pokemon_type = match type_str {
            Some(s) if !s.is_empty() => Some(Type::parse(s)?),
            _ => None,
        };
        targets.push(Target { power, pokemon_type });
    }
    TargetSet::new(targets, strict_type_sharing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialize_round_trip() {
        let items = vec!["title,normal".to_string(), "egg".to_string()];
        let set = parse_targets(&items, true).unwrap();
        let serialized = set.serialize();
        let reparsed = parse_targets(&serialized, true).unwrap();
        assert_eq!(set, reparsed);
    }

    #[test]
    fn repeated_power_rejected() {
        let items = vec!["title,normal".to_string(), "title,fire".to_string()];
        assert!(matches!(
            parse_targets(&items, true),
            Err(PicnicError::InvalidTargets(TargetsError::RepeatedPower))
        ));
    }

    #[test]
    fn typed_egg_rejected() {
        let items = vec!["egg,normal".to_string()];
        assert!(matches!(
            parse_targets(&items, true),
            Err(PicnicError::InvalidTargets(TargetsError::TypedEgg))
        ));
    }

    #[test]
    fn sparkling_without_title_rejected() {
        let items = vec!["sparkling,normal".to_string()];
        assert!(matches!(
            parse_targets(&items, true),
            Err(PicnicError::InvalidTargets(TargetsError::SparklingWithoutTitle))
        ));
    }

    #[test]
    fn unreachable_type_sharing_rejected_in_strict_mode() {
        let items = vec![
            "humungo,normal".to_string(),
            "title,normal".to_string(),
            "encounter,normal".to_string(),
        ];
        assert!(matches!(
            parse_targets(&items, true),
            Err(PicnicError::InvalidTargets(TargetsError::UnreachableTypeSharing))
        ));
        assert!(parse_targets(&items, false).is_ok());
    }

    #[test]
    fn validation_is_idempotent() {
        let items = vec!["title,normal".to_string()];
        let a = parse_targets(&items, true).unwrap();
        let b = TargetSet::new(a.targets().to_vec(), true).unwrap();
        assert_eq!(a, b);
    }
}
