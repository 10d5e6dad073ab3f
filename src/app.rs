use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

use crate::config::Config;
use crate::stepper::StepperController;
use crate::steps::StepCatalog;
use crate::ui::{command_for_key, Command, HelpDialog, StepperView, TerminalSession};

pub struct App {
    config: Config,
    stepper: StepperController,
    view: StepperView,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, catalog: StepCatalog) -> Self {
        tracing::info!(steps = catalog.len(), "Stepper initialized");
        Self {
            config,
            stepper: StepperController::new(catalog),
            view: StepperView::new(),
            help_dialog: HelpDialog::new(),
            should_quit: false,
        }
    }

    pub fn stepper(&self) -> &StepperController {
        &self.stepper
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::start(self.config.ui.mouse)?;
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            session.terminal().draw(|f| {
                self.view.render(f, &self.stepper);
                self.help_dialog.render(f);
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) if self.config.ui.mouse => {
                        self.handle_mouse(mouse);
                    }
                    _ => {}
                }
            }
        }

        tracing::info!(
            current = self.stepper.current_step(),
            completed = self.stepper.completed_count(),
            "Stepper closed"
        );
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let Some(command) = command_for_key(key) else {
            return;
        };

        if self.help_dialog.visible {
            match command {
                Command::ToggleHelp | Command::Quit => self.help_dialog.toggle(),
                _ => {}
            }
            return;
        }

        self.handle_command(command);
    }

    /// Run a command; actions the screen does not offer right now are ignored
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.help_dialog.toggle(),
            Command::SelectStep(index) => {
                self.stepper.select_step(index);
            }
            Command::Previous => {
                if let Some(index) = self.stepper.current_step().checked_sub(1) {
                    self.stepper.select_step(index);
                }
            }
            Command::Next => {
                self.stepper.select_step(self.stepper.current_step() + 1);
            }
            Command::Complete => {
                if self.stepper.can_complete() {
                    self.stepper.complete_current_step();
                }
            }
            Command::StepBack => {
                if self.stepper.can_step_back() {
                    self.stepper.step_back();
                }
            }
            Command::NewProcess => {
                if self.stepper.can_reset() {
                    self.stepper.reset();
                }
            }
        }
    }

    /// Left click on a step selects it
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.help_dialog.visible {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(index) = self.view.step_at(mouse.column, mouse.row) {
                self.stepper.select_step(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        App::new(Config::default(), StepCatalog::inheritance())
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = self::app();
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_enter_completes_and_advances() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.stepper().current_step(), 2);
        assert_eq!(app.stepper().completed_count(), 2);
    }

    #[test]
    fn test_complete_ignored_on_completed_step() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.stepper().current_step(), 0);

        // Step 1 is already completed, so the action is not offered
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.stepper().current_step(), 0);
    }

    #[test]
    fn test_digit_on_pending_step_ignored() {
        let mut app = app();
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(app.stepper().current_step(), 0);
    }

    #[test]
    fn test_previous_and_next() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.stepper().current_step(), 1);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.stepper().current_step(), 2);
        // Step 3 is pending
        app.handle_key(KeyCode::Right);
        assert_eq!(app.stepper().current_step(), 2);
    }

    #[test]
    fn test_previous_at_first_step_is_noop() {
        let mut app = app();
        app.handle_key(KeyCode::Char('h'));
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.stepper().current_step(), 0);
    }

    #[test]
    fn test_new_process_only_when_finished() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.stepper().current_step(), 1);

        for _ in 0..5 {
            app.handle_key(KeyCode::Enter);
        }
        assert!(app.stepper().can_reset());
        app.handle_key(KeyCode::Char('n'));
        assert_eq!(app.stepper().current_step(), 0);
        assert_eq!(app.stepper().completed_count(), 0);
    }

    #[test]
    fn test_help_swallows_actions() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.stepper().current_step(), 0);

        // Esc closes help rather than quitting
        app.handle_key(KeyCode::Esc);
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.stepper().current_step(), 1);
    }

    #[test]
    fn test_click_selects_step() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| app.view.render(f, &app.stepper))
            .unwrap();

        // First step cell, below the header
        app.handle_mouse(click(5, 4));
        assert_eq!(app.stepper().current_step(), 0);

        // Step 4 (index 3) is pending
        app.handle_mouse(click(65, 4));
        assert_eq!(app.stepper().current_step(), 0);

        // Step 3 (index 2) follows completed step 2
        app.handle_mouse(click(45, 4));
        assert_eq!(app.stepper().current_step(), 2);
    }
}
