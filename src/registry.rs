use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub const RESULTS_REGION: &str = "results";
pub const OVERLAY_REGION: &str = "overlay";
pub const NAME_INPUT_REGION: &str = "name-input";

const KNOWN_REGIONS: [&str; 3] = [RESULTS_REGION, OVERLAY_REGION, NAME_INPUT_REGION];
const MAX_BUTTONS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    RegionId,
    ShowNameButton,
}

/// Reference to a resolved piece of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    ResultsList,
    Overlay,
    NameInput,
    /// A preset filter button fired by a digit key.
    Button { key: char, position: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate {kind:?} value: {value}")]
    Duplicate { kind: SelectorKind, value: String },

    #[error("blank {0:?} value")]
    Blank(SelectorKind),

    #[error("unknown region id: {0}")]
    UnknownRegion(String),

    #[error("at most {max} preset buttons are supported, got {count}")]
    TooManyButtons { max: usize, count: usize },
}

/// Maps logical names to screen elements. Resolved once at startup.
pub struct ElementRegistry;

impl ElementRegistry {
    pub fn resolve(
        kind: SelectorKind,
        values: &[String],
    ) -> Result<HashMap<String, ElementRef>, RegistryError> {
        if kind == SelectorKind::ShowNameButton && values.len() > MAX_BUTTONS {
            return Err(RegistryError::TooManyButtons {
                max: MAX_BUTTONS,
                count: values.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut resolved = HashMap::with_capacity(values.len());
        for (position, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                return Err(RegistryError::Blank(kind));
            }
            if !seen.insert(value.trim()) {
                return Err(RegistryError::Duplicate {
                    kind,
                    value: value.clone(),
                });
            }
            let element = match kind {
                SelectorKind::RegionId => match value.as_str() {
                    RESULTS_REGION => ElementRef::ResultsList,
                    OVERLAY_REGION => ElementRef::Overlay,
                    NAME_INPUT_REGION => ElementRef::NameInput,
                    other => return Err(RegistryError::UnknownRegion(other.to_string())),
                },
                SelectorKind::ShowNameButton => ElementRef::Button {
                    key: digit_key(position),
                    position,
                },
            };
            resolved.insert(value.clone(), element);
        }
        Ok(resolved)
    }

    /// Every region the controller needs.
    pub fn region_ids() -> Vec<String> {
        KNOWN_REGIONS.iter().map(|s| s.to_string()).collect()
    }
}

fn digit_key(position: usize) -> char {
    char::from_digit(position as u32 + 1, 10).unwrap_or('?')
}

/// Preset buttons in display order, paired with their keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonStrip {
    buttons: Vec<(char, String)>,
}

impl ButtonStrip {
    /// Build the strip from resolved buttons. Names are trimmed here, so the
    /// label a button shows is exactly the filter value it selects.
    pub fn from_resolved(resolved: &HashMap<String, ElementRef>) -> Self {
        let mut buttons: Vec<(usize, char, String)> = resolved
            .iter()
            .filter_map(|(name, element)| match element {
                ElementRef::Button { key, position } => Some((*position, *key, name.trim().to_string())),
                _ => None,
            })
            .collect();
        buttons.sort_by_key(|(position, _, _)| *position);
        Self {
            buttons: buttons.into_iter().map(|(_, key, name)| (key, name)).collect(),
        }
    }

    pub fn name_for_key(&self, key: char) -> Option<&str> {
        self.buttons
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.buttons.iter().map(|(k, name)| (*k, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_regions() {
        let resolved = ElementRegistry::resolve(SelectorKind::RegionId, &ElementRegistry::region_ids())
            .unwrap();
        assert_eq!(resolved.get(RESULTS_REGION), Some(&ElementRef::ResultsList));
        assert_eq!(resolved.get(OVERLAY_REGION), Some(&ElementRef::Overlay));
        assert_eq!(resolved.get(NAME_INPUT_REGION), Some(&ElementRef::NameInput));
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let err = ElementRegistry::resolve(SelectorKind::RegionId, &strings(&["sidebar"])).unwrap_err();
        assert_eq!(err, RegistryError::UnknownRegion("sidebar".to_string()));
    }

    #[test]
    fn test_buttons_get_digit_keys_in_order() {
        let resolved =
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &strings(&["harry", "batman"]))
                .unwrap();
        let strip = ButtonStrip::from_resolved(&resolved);

        let buttons: Vec<(char, &str)> = strip.iter().collect();
        assert_eq!(buttons, vec![('1', "harry"), ('2', "batman")]);
        assert_eq!(strip.name_for_key('2'), Some("batman"));
        assert_eq!(strip.name_for_key('3'), None);
    }

    #[test]
    fn test_duplicate_buttons_are_rejected() {
        let err =
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &strings(&["lost", "lost"]))
                .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));

        let err =
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &strings(&["lost", " lost "]))
                .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
    }

    #[test]
    fn test_button_names_are_trimmed() {
        let resolved =
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &strings(&[" lost ", "fringe"]))
                .unwrap();
        let strip = ButtonStrip::from_resolved(&resolved);

        assert_eq!(strip.name_for_key('1'), Some("lost"));
        assert!(!strip.is_empty());
        assert!(ButtonStrip::default().is_empty());
    }

    #[test]
    fn test_blank_and_too_many_buttons_are_rejected() {
        assert_eq!(
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &strings(&[" "])).unwrap_err(),
            RegistryError::Blank(SelectorKind::ShowNameButton)
        );

        let ten: Vec<String> = (0..10).map(|i| format!("show{i}")).collect();
        assert_eq!(
            ElementRegistry::resolve(SelectorKind::ShowNameButton, &ten).unwrap_err(),
            RegistryError::TooManyButtons { max: 9, count: 10 }
        );
    }
}
