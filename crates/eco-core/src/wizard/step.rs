use std::fmt;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    SelectInspector = 1,
    BusinessIdentity = 2,
    SelectForm = 3,
    Checklist = 4,
    SignAndFinalize = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::SelectInspector,
        Step::BusinessIdentity,
        Step::SelectForm,
        Step::Checklist,
        Step::SignAndFinalize,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Step> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Step-indicator label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SelectInspector => "Pengawas",
            Self::BusinessIdentity => "Identitas",
            Self::SelectForm => "Formulir",
            Self::Checklist => "Checklist",
            Self::SignAndFinalize => "Sahkan",
        }
    }

    pub(crate) fn previous(self) -> Option<Step> {
        Self::from_number(self.number() - 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// How a session was entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryContext {
    /// Form chosen before the wizard started (dashboard shortcut). When set,
    /// the form selection step is skipped.
    pub preselected_form: Option<String>,
}

impl EntryContext {
    pub fn with_form(form_id: impl Into<String>) -> Self {
        Self {
            preselected_form: Some(form_id.into()),
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Editing,
    /// Finalize is committing the record.
    Submitting,
    /// The record is archived; the session accepts no further operations.
    Finished,
}
