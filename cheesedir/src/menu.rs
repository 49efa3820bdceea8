//! Top-level menu choices

/// One numbered menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Reload = 1,
    Persist = 2,
    DisplayAll = 3,
    Create = 4,
    Display = 5,
    Edit = 6,
    Delete = 7,
    Exit = 8,
}

impl MenuOption {
    /// Get all menu options in display order
    pub fn all_variants() -> [MenuOption; 8] {
        [
            MenuOption::Reload,
            MenuOption::Persist,
            MenuOption::DisplayAll,
            MenuOption::Create,
            MenuOption::Display,
            MenuOption::Edit,
            MenuOption::Delete,
            MenuOption::Exit,
        ]
    }

    pub fn number(self) -> i64 {
        self as i64
    }

    pub fn from_number(number: i64) -> Option<Self> {
        Self::all_variants().into_iter().find(|o| o.number() == number)
    }

    /// Menu text; reads come from the database when the mirror is active
    pub fn label(self, mirrored: bool) -> &'static str {
        match (self, mirrored) {
            (MenuOption::Reload, _) => "Reload the data",
            (MenuOption::Persist, true) => "Persist the records in database to file",
            (MenuOption::Persist, false) => "Persist the in-memory data to file",
            (MenuOption::DisplayAll, true) => "Display all records from database",
            (MenuOption::DisplayAll, false) => "Display all records",
            (MenuOption::Create, _) => "Create a new record",
            (MenuOption::Display, true) => "Display a record from database",
            (MenuOption::Display, false) => "Display a record",
            (MenuOption::Edit, _) => "Edit a record",
            (MenuOption::Delete, _) => "Delete a record",
            (MenuOption::Exit, _) => "Exit",
        }
    }
}

/// Full menu text, one option per line
pub fn render_menu(mirrored: bool) -> String {
    let mut text = String::from(
        "\nCanadian Cheese Directory App\nPlease choose from the following options:\n",
    );
    for option in MenuOption::all_variants() {
        text.push_str(&format!(" {}. {}\n", option.number(), option.label(mirrored)));
    }
    text
}
