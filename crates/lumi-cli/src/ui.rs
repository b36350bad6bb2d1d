use lumi_core::timer::format_long_clock;
use lumi_core::{Mode, Settings, TimerSnapshot};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;

const FOCUS_COLOR: Color = Color::Rgb(100, 181, 246);
const BREAK_COLOR: Color = Color::Rgb(0, 255, 150);

pub fn mode_banner(mode: Mode) -> &'static str {
    match mode {
        Mode::Focus => "🎯 === FOCUS MODE ===",
        Mode::Break => "☕ === BREAK MODE ===",
    }
}

pub fn controls_hint(is_running: bool) -> &'static str {
    if is_running {
        "(p) Pause | (space) Toggle | (k) Skip to next"
    } else {
        "(r) Resume | (space) Toggle | (k) Skip to next"
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub fn settings_line(settings: &Settings) -> String {
    format!(
        "Focus {}m (f/F) | Break {}m (b/B) | Auto-break {} (a) | Auto-focus {} (A)",
        settings.focus_minutes,
        settings.break_minutes,
        on_off(settings.auto_start_break),
        on_off(settings.auto_start_focus),
    )
}

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Focus => FOCUS_COLOR,
        Mode::Break => BREAK_COLOR,
    }
}

pub fn render(f: &mut Frame, app: &App) {
    let snapshot: TimerSnapshot = app.timer.snapshot();
    let color = mode_color(snapshot.mode);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.size());

    let banner = Paragraph::new(mode_banner(snapshot.mode))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    f.render_widget(banner, chunks[0]);

    let status = if snapshot.is_running { "" } else { "  (paused)" };
    let clock = Paragraph::new(format!(
        "Time: {}{status}",
        format_long_clock(snapshot.remaining_secs)
    ))
    .alignment(Alignment::Center)
    .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(clock, chunks[1]);

    let elapsed = 1.0 - snapshot.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(elapsed.clamp(0.0, 1.0))
        .label(format!("{:.0}%", elapsed * 100.0));
    f.render_widget(gauge, chunks[2]);

    f.render_widget(
        Paragraph::new(controls_hint(snapshot.is_running)).alignment(Alignment::Center),
        chunks[3],
    );
    f.render_widget(
        Paragraph::new(settings_line(app.settings()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
    f.render_widget(
        Paragraph::new("Press q or Ctrl+C to quit").alignment(Alignment::Center),
        chunks[5],
    );

    if let Some(message) = app.message {
        f.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(color)),
            chunks[6],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_follow_running_state() {
        assert!(controls_hint(true).starts_with("(p) Pause"));
        assert!(controls_hint(false).starts_with("(r) Resume"));
    }

    #[test]
    fn settings_line_shows_all_four_values() {
        let line = settings_line(&Settings::new(30, 10, true, false));
        assert!(line.contains("Focus 30m"));
        assert!(line.contains("Break 10m"));
        assert!(line.contains("Auto-break off"));
        assert!(line.contains("Auto-focus on"));
    }

    #[test]
    fn banners_name_the_mode() {
        assert!(mode_banner(Mode::Focus).contains("FOCUS"));
        assert!(mode_banner(Mode::Break).contains("BREAK"));
    }
}
