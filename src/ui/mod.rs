pub mod help;
pub mod keybindings;
pub mod stepper_view;
pub mod terminal;

pub use help::HelpDialog;
pub use keybindings::{command_for_key, Command};
pub use stepper_view::StepperView;
pub use terminal::{install_panic_hook, TerminalSession};
