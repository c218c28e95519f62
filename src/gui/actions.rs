use std::path::PathBuf;

// A simple ui action queue so panels don't need mutable access to the app
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // Upload
    SelectFile(PathBuf),
    Upload,

    // Jobs
    Train,
    Synthesize,

    // Output
    SaveOutput(PathBuf),

    // Modals
    OpenServerSettings,
    DismissNotice,

    Quit,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
