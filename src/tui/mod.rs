//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::{Datelike, Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::analytics::{Analytics, yearly_rings};
use crate::db::Database;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Weekly rows shown in the progress table
const VISIBLE_WEEKS: usize = 8;

/// App state for TUI
pub struct App {
    db: Database,
    analytics: Analytics,
    year: i32,
    should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self> {
        let analytics = Analytics::new(db.get_logs()?);
        Ok(Self {
            db,
            analytics,
            year: Local::now().year(),
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new("fitrecap - Workout Progress")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        self.render_level(frame, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.render_weeks(frame, body[0]);
        self.render_recap(frame, body[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: refresh | ←/→: recap year")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn render_level(&self, frame: &mut Frame, area: Rect) {
        let info = self.analytics.level(Utc::now());
        let badges = if info.badges.is_empty() {
            "-".to_string()
        } else {
            info.badges.join(" ")
        };
        let text = vec![
            Line::from(format!(
                "Lv.{}  day {}/{}",
                info.level, info.current_day, info.days_in_cycle
            )),
            Line::from(format!("Badges: {}", badges)),
        ];
        let level = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Level"));
        frame.render_widget(level, area);
    }

    fn render_weeks(&self, frame: &mut Frame, area: Rect) {
        let summaries = self.analytics.weekly_summaries();
        let rows: Vec<Row> = summaries
            .iter()
            .rev()
            .take(VISIBLE_WEEKS)
            .map(|s| {
                Row::new(vec![
                    Cell::from(format!("W{}", s.week_index + 1)),
                    Cell::from(format!("{}-{}", s.start_date, s.end_date)),
                    Cell::from(s.total_sessions.to_string()),
                    Cell::from(format!("{:.0}", s.total_volume)),
                    Cell::from(s.most_frequent_exercise.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
        .header(Row::new(vec!["Week", "Dates", "Sessions", "Volume", "Top"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title("Weeks"));

        frame.render_widget(table, area);
    }

    fn render_recap(&self, frame: &mut Frame, area: Rect) {
        let recap = self.analytics.yearly_recap(self.year);
        let title = format!("Recap {}", self.year);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let achievements: Vec<_> = self
            .analytics
            .achievements(&recap)
            .iter()
            .map(|a| a.emoji())
            .collect();
        let text = vec![
            Line::from(format!("Workouts:  {}", recap.total_workouts)),
            Line::from(format!("Volume:    {:.0}", recap.total_volume)),
            Line::from(format!("Distance:  {:.1} km", recap.total_distance)),
            Line::from(format!("Minutes:   {:.0}", recap.total_minutes)),
            Line::from(format!("Streak:    {} days", recap.longest_streak)),
            Line::from(format!(
                "Best:      {}",
                recap.best_exercise.as_deref().unwrap_or("-")
            )),
            Line::from(achievements.join(" ")),
        ];
        let stats = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(stats, chunks[0]);

        let colors = [Color::Magenta, Color::Green, Color::Cyan];
        for ((ring, color), chunk) in yearly_rings(&recap).iter().zip(colors).zip(&chunks[1..]) {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(ring.kind.label()))
                .gauge_style(Style::default().fg(color))
                .ratio(ring.progress)
                .label(format!("{:.0} / {:.0}", ring.value, ring.goal));
            frame.render_widget(gauge, *chunk);
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.analytics = Analytics::new(self.db.get_logs()?);
                        }
                        KeyCode::Left => self.year -= 1,
                        KeyCode::Right => self.year += 1,
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
