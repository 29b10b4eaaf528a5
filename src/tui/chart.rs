//! Marks distribution chart
//!
//! A full-screen bar chart of histogram bins. The view blocks until a key is
//! pressed, then hands the terminal back to the menu.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::error::{GradebookError, GradebookResult};
use crate::stats::Histogram;

use super::terminal::{init_terminal, restore_terminal};

pub const CHART_TITLE: &str = " Marks Distribution ";
pub const X_AXIS_LABEL: &str = "Marks";
pub const Y_AXIS_LABEL: &str = "Number of Students";

/// Rows between horizontal gridlines
const GRID_SPACING: u16 = 3;

/// Somewhere a histogram can be shown to the user
pub trait DistributionView {
    /// Show the histogram, returning once the user dismisses it
    fn show(&mut self, histogram: &Histogram) -> GradebookResult<()>;
}

/// Renders the histogram in the alternate screen and waits for a key press
#[derive(Debug, Default)]
pub struct TerminalChart;

impl TerminalChart {
    pub fn new() -> Self {
        Self
    }
}

impl DistributionView for TerminalChart {
    fn show(&mut self, histogram: &Histogram) -> GradebookResult<()> {
        let mut terminal = init_terminal().map_err(display_error)?;

        let result = run_chart(&mut terminal, histogram);
        let restored = restore_terminal().map_err(display_error);

        result?;
        restored
    }
}

fn run_chart(terminal: &mut super::Tui, histogram: &Histogram) -> GradebookResult<()> {
    loop {
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_distribution(frame, area, histogram);
            })
            .map_err(|e| GradebookError::Display(e.to_string()))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            // Resize and anything else just redraws
            _ => {}
        }
    }
}

fn display_error(err: anyhow::Error) -> GradebookError {
    GradebookError::Display(err.to_string())
}

/// Render the distribution chart with its axis captions and key hint
pub fn render_distribution(frame: &mut Frame, area: Rect, histogram: &Histogram) {
    let [y_caption, chart_area, x_caption, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let caption_style = Style::default().fg(Color::Yellow);
    frame.render_widget(
        Paragraph::new(format!("↑ {}", Y_AXIS_LABEL)).style(caption_style),
        y_caption,
    );
    frame.render_widget(
        Paragraph::new(format!("{} →", X_AXIS_LABEL))
            .style(caption_style)
            .centered(),
        x_caption,
    );
    frame.render_widget(
        Paragraph::new("Press any key to return").style(Style::default().fg(Color::DarkGray)),
        hint,
    );

    let block = Block::default()
        .title(CHART_TITLE)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(chart_area);
    frame.render_widget(block, chart_area);

    // Gridlines go down first so the bars paint over them
    frame.render_widget(Gridlines::new(GRID_SPACING), inner);

    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count)
                .label(Line::from(bin_label(bin.range.start)))
                .style(Style::default().fg(Color::Cyan))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(inner.width, bars.len()))
        .bar_gap(1);
    frame.render_widget(chart, inner);
}

/// Widest bar that still fits every bin, with one column between bars
fn bar_width(available: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let bars = u16::try_from(bars).unwrap_or(u16::MAX);
    let gaps = bars.saturating_sub(1);
    (available.saturating_sub(gaps) / bars).max(1)
}

/// Bin start, without a trailing `.0` for whole numbers
fn bin_label(start: f64) -> String {
    if start.fract() == 0.0 {
        format!("{:.0}", start)
    } else {
        format!("{:.1}", start)
    }
}

/// Dim horizontal rules counted up from the bottom of the area
struct Gridlines {
    spacing: u16,
}

impl Gridlines {
    fn new(spacing: u16) -> Self {
        Self {
            spacing: spacing.max(1),
        }
    }
}

impl Widget for Gridlines {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        let rule = "─".repeat(usize::from(area.width));
        let style = Style::default().fg(Color::DarkGray);
        // The bottom row holds the bar labels
        let mut y = area.bottom() - 1;
        while y > area.top() + self.spacing {
            y -= self.spacing;
            buf.set_string(area.left(), y, &rule, style);
        }
    }
}
