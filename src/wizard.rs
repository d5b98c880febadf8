// Study wizard - two steps on one toggle group
//
//   DefineArea ──continue (any dimension > 0)──▶ ChooseApplication
//        ▲                                              │
//        └──────────────────── back ────────────────────┘
//                                                       │
//                              continue (application selected)
//                                                       ▼
//                                          "Proceeding with ... application..."
//
// Validation lives here, not in the toggle group. A failed validation is an
// EmptyInput error whose message is shown verbatim as a notice.

use crate::error::PageError;
use crate::toggle::{ExclusiveToggleGroup, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    DefineArea,
    ChooseApplication,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            Self::DefineArea => "Define Area",
            Self::ChooseApplication => "Choose Application",
        }
    }
}

/// Applications offered in the second step
pub const APPLICATIONS: [&str; 8] = [
    "Office",
    "Retail",
    "Industrial",
    "Educational",
    "Healthcare",
    "Hospitality",
    "Residential",
    "Outdoor",
];

pub const MSG_NEED_DIMENSION: &str = "Please enter at least one dimension before continuing.";
pub const MSG_NEED_APPLICATION: &str = "Please select an application type before continuing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionField {
    #[default]
    Length,
    Width,
    Height,
}

impl DimensionField {
    pub const ALL: [DimensionField; 3] = [Self::Length, Self::Width, Self::Height];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Length => "Length (m)",
            Self::Width => "Width (m)",
            Self::Height => "Height (m)",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Length => Self::Width,
            Self::Width => Self::Height,
            Self::Height => Self::Length,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Length => Self::Height,
            Self::Width => Self::Length,
            Self::Height => Self::Width,
        }
    }
}

/// Wizard state: step group plus the inputs of both steps
#[derive(Debug)]
pub struct StudyWizard {
    steps: ExclusiveToggleGroup<WizardStep>,
    dimensions: [String; 3],
    focused: DimensionField,
    application: Option<usize>,
    /// Highlight cursor in the application list
    cursor: usize,
}

impl StudyWizard {
    pub fn new() -> Result<Self, PageError> {
        let steps = ExclusiveToggleGroup::with_default(
            "Wizard",
            [WizardStep::DefineArea, WizardStep::ChooseApplication],
            WizardStep::DefineArea,
        )?;
        Ok(Self {
            steps,
            dimensions: Default::default(),
            focused: DimensionField::default(),
            application: None,
            cursor: 0,
        })
    }

    pub fn steps(&self) -> &ExclusiveToggleGroup<WizardStep> {
        &self.steps
    }

    pub fn step(&self) -> WizardStep {
        self.steps.active().unwrap_or(WizardStep::DefineArea)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Step 1: dimensions
    // ─────────────────────────────────────────────────────────────────────

    pub fn dimension(&self, field: DimensionField) -> &str {
        &self.dimensions[field as usize]
    }

    pub fn focused(&self) -> DimensionField {
        self.focused
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Type into the focused field; only digits and one decimal point get in
    pub fn insert_char(&mut self, c: char) -> bool {
        let value = &mut self.dimensions[self.focused as usize];
        let accepted = c.is_ascii_digit() || (c == '.' && !value.contains('.'));
        if accepted {
            value.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        self.dimensions[self.focused as usize].pop();
    }

    /// Replace a field wholesale (no filtering)
    pub fn set_dimension(&mut self, field: DimensionField, value: impl Into<String>) {
        self.dimensions[field as usize] = value.into();
    }

    /// At least one field holds a positive number
    pub fn has_dimension(&self) -> bool {
        self.dimensions
            .iter()
            .filter_map(|v| v.trim().parse::<f64>().ok())
            .any(|n| n.is_finite() && n > 0.0)
    }

    pub fn continue_to_application(
        &mut self,
    ) -> Result<Option<Transition<WizardStep>>, PageError> {
        if !self.has_dimension() {
            return Err(PageError::EmptyInput(MSG_NEED_DIMENSION.to_string()));
        }
        self.steps.activate(WizardStep::ChooseApplication)
    }

    pub fn back_to_area(&mut self) -> Result<Option<Transition<WizardStep>>, PageError> {
        self.steps.activate(WizardStep::DefineArea)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Step 2: application
    // ─────────────────────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_next(&mut self) {
        self.cursor = (self.cursor + 1) % APPLICATIONS.len();
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = (self.cursor + APPLICATIONS.len() - 1) % APPLICATIONS.len();
    }

    /// Select the highlighted application; selecting it again keeps it
    pub fn select_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub fn select(&mut self, index: usize) {
        if index < APPLICATIONS.len() {
            self.application = Some(index);
            self.cursor = index;
            tracing::debug!(application = APPLICATIONS[index], "application selected");
        }
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.application.map(|i| APPLICATIONS[i])
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.application == Some(index)
    }

    /// Finish the wizard; the returned text is shown as a notice
    pub fn continue_from_application(&self) -> Result<String, PageError> {
        match self.selected() {
            Some(label) => Ok(format!("Proceeding with {} application...", label)),
            None => Err(PageError::EmptyInput(MSG_NEED_APPLICATION.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::PanelMark;

    #[test]
    fn test_starts_on_define_area() {
        let wizard = StudyWizard::new().unwrap();
        assert_eq!(wizard.step(), WizardStep::DefineArea);
        assert_eq!(
            wizard.steps().mark(WizardStep::ChooseApplication),
            PanelMark::Hidden
        );
    }

    #[test]
    fn test_continue_requires_a_dimension() {
        let mut wizard = StudyWizard::new().unwrap();
        let err = wizard.continue_to_application().unwrap_err();
        assert_eq!(err.user_message(), MSG_NEED_DIMENSION);
        assert_eq!(wizard.step(), WizardStep::DefineArea);
    }

    #[test]
    fn test_zero_and_garbage_do_not_count() {
        let mut wizard = StudyWizard::new().unwrap();
        wizard.set_dimension(DimensionField::Length, "0");
        wizard.set_dimension(DimensionField::Width, "abc");
        wizard.set_dimension(DimensionField::Height, "-3");
        assert!(!wizard.has_dimension());
        assert!(wizard.continue_to_application().is_err());
    }

    #[test]
    fn test_single_dimension_is_enough() {
        let mut wizard = StudyWizard::new().unwrap();
        wizard.set_dimension(DimensionField::Height, "2.7");
        let t = wizard.continue_to_application().unwrap().unwrap();
        assert_eq!(t.from, Some(WizardStep::DefineArea));
        assert_eq!(t.to, WizardStep::ChooseApplication);
        assert_eq!(
            wizard.steps().mark(WizardStep::DefineArea),
            PanelMark::Previous
        );
    }

    #[test]
    fn test_back_returns_to_area_and_keeps_inputs() {
        let mut wizard = StudyWizard::new().unwrap();
        wizard.set_dimension(DimensionField::Length, "12");
        wizard.continue_to_application().unwrap();
        wizard.back_to_area().unwrap();
        assert_eq!(wizard.step(), WizardStep::DefineArea);
        assert_eq!(wizard.dimension(DimensionField::Length), "12");
    }

    #[test]
    fn test_insert_filters_non_numeric() {
        let mut wizard = StudyWizard::new().unwrap();
        for c in "1a2.5.x".chars() {
            wizard.insert_char(c);
        }
        assert_eq!(wizard.dimension(DimensionField::Length), "12.5");

        wizard.focus_next();
        assert_eq!(wizard.focused(), DimensionField::Width);
        wizard.insert_char('7');
        wizard.backspace();
        assert_eq!(wizard.dimension(DimensionField::Width), "");

        wizard.focus_prev();
        wizard.focus_prev();
        assert_eq!(wizard.focused(), DimensionField::Height);
    }

    #[test]
    fn test_application_required_to_finish() {
        let wizard = StudyWizard::new().unwrap();
        let err = wizard.continue_from_application().unwrap_err();
        assert_eq!(err.user_message(), MSG_NEED_APPLICATION);
    }

    #[test]
    fn test_finish_reports_selected_application() {
        let mut wizard = StudyWizard::new().unwrap();
        wizard.cursor_next();
        wizard.cursor_next();
        wizard.select_cursor();
        assert!(wizard.is_selected(2));
        assert_eq!(
            wizard.continue_from_application().unwrap(),
            "Proceeding with Industrial application..."
        );
    }

    #[test]
    fn test_cursor_wraps_and_select_ignores_out_of_range() {
        let mut wizard = StudyWizard::new().unwrap();
        wizard.cursor_prev();
        assert_eq!(wizard.cursor(), APPLICATIONS.len() - 1);
        wizard.select(APPLICATIONS.len());
        assert_eq!(wizard.selected(), None);
    }
}
