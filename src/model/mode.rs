/// Screens of the note manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Main menu: "New Note" or "View Notes".
    #[default]
    Menu,
    /// Title list of existing notes.
    NoteList,
    /// A single note's title and content.
    ViewNote,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Menu => "MENU",
            Mode::NoteList => "NOTES",
            Mode::ViewNote => "VIEW",
        }
    }
}
