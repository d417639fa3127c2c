use super::{Algorithm, ScheduleError, ScheduleResult};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

/// One algorithm's outcome over the loaded process set.
pub struct Comparison {
    pub algorithm: Algorithm,
    pub outcome: Result<ScheduleResult, ScheduleError>,
}

const TICK_RATE: Duration = Duration::from_millis(200);

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => return,
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        source: &str,
        quantum: usize,
        comparisons: &[Comparison],
    ) -> io::Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(f.size());

            let header = Paragraph::new(format!(
                "{source} | RR quantum {quantum} | q to quit"
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Process File")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(header, chunks[0]);

            let rows = comparisons.iter().map(|comparison| {
                let name = Cell::from(comparison.algorithm.name())
                    .style(Style::default().add_modifier(Modifier::BOLD));
                match &comparison.outcome {
                    Ok(result) => Row::new(vec![
                        name,
                        Cell::from(format!("{:.2}", result.average_waiting_time)),
                        Cell::from(format!("{:.2}", result.average_turnaround_time)),
                        Cell::from(result.total_run_time.to_string()),
                    ]),
                    Err(err) => Row::new(vec![name, Cell::from(err.to_string())])
                        .style(Style::default().fg(Color::LightRed)),
                }
            });

            let table = Table::new(rows)
                .header(
                    Row::new(vec!["Algorithm", "Avg waiting", "Avg turnaround", "Total"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Length(15),
                    Constraint::Length(10),
                ])
                .block(
                    Block::default()
                        .title("Scheduling Comparison")
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);
        })?;
        Ok(())
    }

    /// Blocks until the next tick or key press; true once `q` is pressed.
    pub fn should_quit(&self) -> bool {
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => {
                key.modifiers.is_empty() && key.code == KeyCode::Char('q')
            }
            Ok(DisplayEvent::Tick) => false,
            // Input thread gave up on the terminal
            Err(_) => true,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
