use crate::fetch::FetchRequest;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("search text is empty")]
    Blank,
}

/// The single active search key. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selected_name: String,
}

impl FilterState {
    /// Trims `name` and rejects it if nothing is left.
    pub fn new(name: &str) -> Result<Self, FilterError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FilterError::Blank);
        }
        Ok(Self {
            selected_name: trimmed.to_string(),
        })
    }

    pub fn selected_name(&self) -> &str {
        &self.selected_name
    }
}

/// Free-text search field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    invalid: bool,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }
}

/// Owns the filter state and decides when a search cycle starts.
///
/// Each cycle gets a fresh generation number; only a result carrying the
/// latest generation may be rendered.
#[derive(Debug)]
pub struct SearchController {
    filter: FilterState,
    input: TextInput,
    generation: u64,
}

impl SearchController {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            input: TextInput::default(),
            generation: 0,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// Select a preset. Presets are validated when the button strip is
    /// resolved, so a blank value here is only logged and skipped.
    pub fn select_from_button(&mut self, value: &str) -> Option<FetchRequest> {
        match FilterState::new(value) {
            Ok(filter) => {
                self.filter = filter;
                Some(self.trigger_cycle())
            }
            Err(e) => {
                tracing::warn!(value, error = %e, "ignoring blank preset button");
                None
            }
        }
    }

    /// Submit free text. On a blank entry the input is marked invalid and
    /// nothing else changes.
    pub fn select_from_text(&mut self, raw: &str) -> Result<FetchRequest, FilterError> {
        match FilterState::new(raw) {
            Ok(filter) => {
                self.filter = filter;
                self.input.value.clear();
                self.input.invalid = false;
                Ok(self.trigger_cycle())
            }
            Err(e) => {
                self.input.invalid = true;
                tracing::debug!(raw, "rejected blank search text");
                Err(e)
            }
        }
    }

    /// Start a fetch-and-render cycle for the current filter.
    pub fn trigger_cycle(&mut self) -> FetchRequest {
        self.generation += 1;
        tracing::info!(
            generation = self.generation,
            name = self.filter.selected_name(),
            "search issued"
        );
        FetchRequest::Search {
            generation: self.generation,
            name: self.filter.selected_name().to_string(),
        }
    }

    /// Whether a result for `generation` is still the one to show.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> SearchController {
        SearchController::new(FilterState::new("harry").unwrap())
    }

    fn type_text(controller: &mut SearchController, text: &str) {
        for c in text.chars() {
            controller.input_mut().push(c);
        }
    }

    #[test]
    fn test_filter_state_rejects_blank() {
        assert_eq!(FilterState::new(""), Err(FilterError::Blank));
        assert_eq!(FilterState::new(" \t\n"), Err(FilterError::Blank));
        assert_eq!(FilterState::new("  lost ").unwrap().selected_name(), "lost");
    }

    #[test]
    fn test_button_selects_and_triggers() {
        let mut c = controller();
        let request = c.select_from_button("batman");

        assert_eq!(c.filter().selected_name(), "batman");
        assert_eq!(
            request,
            Some(FetchRequest::Search { generation: 1, name: "batman".to_string() })
        );
    }

    #[test]
    fn test_blank_text_marks_invalid_and_issues_nothing() {
        for raw in ["", "   "] {
            let mut c = controller();
            type_text(&mut c, raw);

            let result = c.select_from_text(raw);

            assert_eq!(result, Err(FilterError::Blank));
            assert_eq!(c.filter().selected_name(), "harry");
            assert!(c.input().is_invalid());
            assert_eq!(c.latest_generation(), 0);
        }
    }

    #[test]
    fn test_valid_text_clears_input_and_invalid_marker() {
        let mut c = controller();
        let _ = c.select_from_text("  ");
        assert!(c.input().is_invalid());

        type_text(&mut c, "  superman ");
        let raw = c.input().value().to_string();
        let request = c.select_from_text(&raw).unwrap();

        assert_eq!(c.filter().selected_name(), "superman");
        assert_eq!(c.input().value(), "");
        assert!(!c.input().is_invalid());
        assert_eq!(request, FetchRequest::Search { generation: 1, name: "superman".to_string() });
    }

    #[test]
    fn test_generations_increase_and_only_latest_is_current() {
        let mut c = controller();
        let first = c.trigger_cycle();
        let second = c.select_from_button("superman").unwrap();

        let FetchRequest::Search { generation: g1, .. } = first else { panic!() };
        let FetchRequest::Search { generation: g2, .. } = second else { panic!() };
        assert!(g2 > g1);
        assert!(!c.is_current(g1));
        assert!(c.is_current(g2));
    }

    proptest! {
        #[test]
        fn prop_non_blank_text_selects_once(raw in "\\s{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}\\s{0,3}") {
            let mut c = controller();
            let before = c.latest_generation();

            let request = c.select_from_text(&raw);

            prop_assert!(request.is_ok());
            prop_assert_eq!(c.filter().selected_name(), raw.trim());
            prop_assert_eq!(c.latest_generation(), before + 1);
            prop_assert_eq!(c.input().value(), "");
        }

        #[test]
        fn prop_whitespace_never_selects(raw in "\\s{0,10}") {
            let mut c = controller();

            prop_assert!(c.select_from_text(&raw).is_err());
            prop_assert_eq!(c.filter().selected_name(), "harry");
            prop_assert_eq!(c.latest_generation(), 0);
        }
    }
}
