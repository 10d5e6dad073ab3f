//! Stepper screen: step row with connectors, current step detail, actions
//! and overall progress.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::stepper::{ConnectorStatus, StepStatus, StepperController};

const PORTAL_TITLE: &str = "Portal de Gestión de Herencias";
const PORTAL_SUBTITLE: &str = "Sigue el progreso de tu proceso de herencia paso a paso";
const FINAL_BANNER: &str = "🎉 ¡Proceso de herencia completado exitosamente!";

/// Glyph shown for the step the user is working on
const CURRENT_GLYPH: &str = "◷";
const COMPLETED_GLYPH: &str = "✔";

/// Renders a [`StepperController`] and remembers where each step was drawn
/// so pointer clicks can be mapped back to step indices.
#[derive(Debug, Default)]
pub struct StepperView {
    step_areas: Vec<Rect>,
}

impl StepperView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step drawn at the given terminal cell in the last frame
    pub fn step_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.step_areas
            .iter()
            .position(|area| area.contains(position))
    }

    pub fn render(&mut self, frame: &mut Frame, stepper: &StepperController) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Step row
                Constraint::Min(8),    // Current step detail
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Overall progress
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        render_header(frame, chunks[0]);
        self.render_step_row(frame, chunks[1], stepper);
        render_detail(frame, chunks[2], stepper);
        render_actions(frame, chunks[3], stepper);
        render_progress(frame, chunks[4], stepper);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" ayuda  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" salir"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[5]);
    }

    fn render_step_row(&mut self, frame: &mut Frame, area: Rect, stepper: &StepperController) {
        let count = stepper.step_count();
        let constraints: Vec<Constraint> = (0..count)
            .map(|_| Constraint::Ratio(1, count as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        self.step_areas = cells.to_vec();

        for (index, step) in stepper.catalog().iter().enumerate() {
            let cell = cells[index];
            let status = stepper.status_of(index);
            let style = status_style(status);

            let glyph = match status {
                StepStatus::Completed => COMPLETED_GLYPH,
                StepStatus::Current => CURRENT_GLYPH,
                _ => step.icon().glyph(),
            };

            // Connectors fill the space either side of the glyph
            let token_width = 5u16;
            let free = cell.width.saturating_sub(token_width);
            let left_len = free / 2;
            let right_len = free - left_len;

            let left = if index > 0 {
                Span::styled(
                    "─".repeat(left_len as usize),
                    Style::default().fg(connector_color(stepper.connector_after(index - 1))),
                )
            } else {
                Span::raw(" ".repeat(left_len as usize))
            };
            let right = if index + 1 < count {
                Span::styled(
                    "─".repeat(right_len as usize),
                    Style::default().fg(connector_color(stepper.connector_after(index))),
                )
            } else {
                Span::raw(" ".repeat(right_len as usize))
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!("{}", index + 1),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
                Line::from(vec![
                    left,
                    Span::styled(format!(" ({glyph})"), style),
                    Span::raw(" "),
                    right,
                ]),
                Line::from(Span::styled(step.title.clone(), title_style(status)))
                    .alignment(Alignment::Center),
                Line::from(Span::styled(
                    status_caption(status),
                    Style::default().fg(Color::DarkGray),
                ))
                .alignment(Alignment::Center),
            ];

            frame.render_widget(Paragraph::new(lines), cell);
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            PORTAL_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            PORTAL_SUBTITLE,
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_detail(frame: &mut Frame, area: Rect, stepper: &StepperController) {
    let step = stepper.current();

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(step.icon().glyph(), Style::default().fg(Color::Blue)),
            Span::raw(" "),
            Span::styled(
                step.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            step.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    if !step.required_docs.is_empty() {
        lines.push(Line::from(Span::styled("Documentos requeridos:", heading)));
        for doc in &step.required_docs {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::DarkGray)),
                Span::raw(doc.clone()),
            ]));
        }
    }

    if let Some(estimated) = &step.estimated_time {
        lines.push(Line::from(Span::styled("Tiempo estimado:", heading)));
        lines.push(Line::from(format!("  {estimated}")));
    }

    if let Some(location) = &step.location {
        lines.push(Line::from(Span::styled("Ubicación:", heading)));
        lines.push(Line::from(format!("  {location}")));
    }

    if step.final_step {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                FINAL_BANNER,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
    }

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, area);
}

fn render_actions(frame: &mut Frame, area: Rect, stepper: &StepperController) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(inner);

    let position = Paragraph::new(Span::styled(
        step_counter_label(stepper),
        Style::default().fg(Color::Gray),
    ));
    frame.render_widget(position, halves[0]);

    let mut spans = Vec::new();
    for (key, label) in action_hints(stepper) {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(" {label}")));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        halves[1],
    );
}

fn render_progress(frame: &mut Frame, area: Rect, stepper: &StepperController) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progreso general ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(stepper.progress().clamp(0.0, 1.0))
        .label(progress_label(stepper));
    frame.render_widget(gauge, area);
}

/// "Paso X de N"
pub fn step_counter_label(stepper: &StepperController) -> String {
    format!(
        "Paso {} de {}",
        stepper.current_step() + 1,
        stepper.step_count()
    )
}

/// "X de N pasos completados"
pub fn progress_label(stepper: &StepperController) -> String {
    format!(
        "{} de {} pasos completados",
        stepper.completed_count(),
        stepper.step_count()
    )
}

/// Key and label for every action currently offered
pub fn action_hints(stepper: &StepperController) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();
    if stepper.can_step_back() {
        hints.push(("b", "Anterior"));
    }
    if stepper.can_complete() {
        hints.push(("Enter", "Completar paso"));
    }
    if stepper.can_reset() {
        hints.push(("n", "Nuevo proceso"));
    }
    hints
}

fn status_caption(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Completed => "completado",
        StepStatus::Current => "en curso",
        StepStatus::Available => "disponible",
        StepStatus::Pending => "pendiente",
    }
}

pub fn status_style(status: StepStatus) -> Style {
    match status {
        StepStatus::Completed => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        StepStatus::Current => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        StepStatus::Available => Style::default().fg(Color::White),
        StepStatus::Pending => Style::default().fg(Color::DarkGray),
    }
}

fn title_style(status: StepStatus) -> Style {
    match status {
        StepStatus::Current => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        StepStatus::Completed => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Gray),
    }
}

pub fn connector_color(connector: ConnectorStatus) -> Color {
    match connector {
        ConnectorStatus::FullyComplete => Color::Green,
        ConnectorStatus::InProgress => Color::Blue,
        ConnectorStatus::NotStarted => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(view: &mut StepperView, stepper: &StepperController) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, stepper)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_initial_screen() {
        let stepper = StepperController::default();
        let mut view = StepperView::new();
        let text = draw(&mut view, &stepper);

        assert!(text.contains(PORTAL_TITLE));
        assert!(text.contains("Subir Documentos"));
        assert!(text.contains("Finalización"));
        assert!(text.contains("Documentos requeridos:"));
        assert!(text.contains("Testamento"));
        assert!(text.contains("Paso 1 de 6"));
        assert!(text.contains("0 de 6 pasos completados"));
        assert!(text.contains("Completar paso"));
        assert!(!text.contains("Anterior"));
    }

    #[test]
    fn test_render_after_progress() {
        let mut stepper = StepperController::default();
        stepper.complete_current_step();
        let mut view = StepperView::new();
        let text = draw(&mut view, &stepper);

        assert!(text.contains("Paso 2 de 6"));
        assert!(text.contains("1 de 6 pasos completados"));
        assert!(text.contains("Tiempo estimado:"));
        assert!(text.contains("3-5 días hábiles"));
        assert!(text.contains("Anterior"));
    }

    #[test]
    fn test_render_finished_workflow() {
        let mut stepper = StepperController::default();
        for _ in 0..6 {
            stepper.complete_current_step();
        }
        let mut view = StepperView::new();
        let text = draw(&mut view, &stepper);

        assert!(text.contains("6 de 6 pasos completados"));
        assert!(text.contains("Nuevo proceso"));
        assert!(!text.contains("Completar paso"));
    }

    #[test]
    fn test_step_hit_areas() {
        let stepper = StepperController::default();
        let mut view = StepperView::new();
        assert_eq!(view.step_at(0, 4), None);

        draw(&mut view, &stepper);
        // Step row starts below the 3-line header; 120 columns / 6 steps
        assert_eq!(view.step_at(0, 4), Some(0));
        assert_eq!(view.step_at(45, 5), Some(2));
        assert_eq!(view.step_at(119, 7), Some(5));
        assert_eq!(view.step_at(10, 1), None);
        assert_eq!(view.step_at(10, 20), None);
    }

    #[test]
    fn test_action_hints_follow_affordances() {
        let mut stepper = StepperController::default();
        assert_eq!(action_hints(&stepper), vec![("Enter", "Completar paso")]);

        stepper.complete_current_step();
        assert_eq!(
            action_hints(&stepper),
            vec![("b", "Anterior"), ("Enter", "Completar paso")]
        );
    }

    #[test]
    fn test_connector_colors() {
        assert_eq!(connector_color(ConnectorStatus::FullyComplete), Color::Green);
        assert_eq!(connector_color(ConnectorStatus::InProgress), Color::Blue);
        assert_eq!(connector_color(ConnectorStatus::NotStarted), Color::DarkGray);
    }
}
