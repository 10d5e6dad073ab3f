//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the help overlay and for the key handling in
//! `App`: a key press is resolved with [`command_for_key`].

use crossterm::event::KeyCode;

/// What a key press asks the stepper screen to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    /// Jump to the step with this 0-based index
    SelectStep(usize),
    Previous,
    Next,
    Complete,
    StepBack,
    NewProcess,
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., lowercase variant or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    /// Category for grouping in help
    pub category: ShortcutCategory,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

impl ShortcutCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Navigation => "Navegación",
            ShortcutCategory::Actions => "Acciones",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Enter", "h/←")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help overlay (left-padded to 12 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<12}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{key:?}"),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // General
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        description: "Salir",
        category: ShortcutCategory::General,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Mostrar/ocultar ayuda",
        category: ShortcutCategory::General,
    },
    // Navigation
    Shortcut {
        key: KeyCode::Char('1'),
        alt_key: Some(KeyCode::Char('9')),
        description: "Ir al paso indicado",
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Char('h'),
        alt_key: Some(KeyCode::Left),
        description: "Paso anterior disponible",
        category: ShortcutCategory::Navigation,
    },
    Shortcut {
        key: KeyCode::Char('l'),
        alt_key: Some(KeyCode::Right),
        description: "Paso siguiente disponible",
        category: ShortcutCategory::Navigation,
    },
    // Actions
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char('c')),
        description: "Completar paso",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char('b'),
        alt_key: Some(KeyCode::Backspace),
        description: "Anterior",
        category: ShortcutCategory::Actions,
    },
    Shortcut {
        key: KeyCode::Char('n'),
        alt_key: None,
        description: "Nuevo proceso",
        category: ShortcutCategory::Actions,
    },
];

/// Map a key press to a command
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('?') => Some(Command::ToggleHelp),
        KeyCode::Char(c @ '1'..='9') => {
            let digit = c.to_digit(10).unwrap_or(1) as usize;
            Some(Command::SelectStep(digit - 1))
        }
        KeyCode::Char('h') | KeyCode::Left => Some(Command::Previous),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::Next),
        KeyCode::Enter | KeyCode::Char('c') => Some(Command::Complete),
        KeyCode::Char('b') | KeyCode::Backspace => Some(Command::StepBack),
        KeyCode::Char('n') => Some(Command::NewProcess),
        _ => None,
    }
}

/// Get shortcuts grouped by category
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}
