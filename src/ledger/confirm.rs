use crate::i18n::Language;

/// Destructive actions that need an affirmative answer before they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPrompt {
    RestartGame,
    ClearHistory,
    ClearAllData,
}

/// Yes/no collaborator asked before a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation {
    fn confirm(&self, prompt: ConfirmPrompt, language: Language) -> bool;
}
