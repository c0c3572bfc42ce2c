use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::model::{agg::Snapshot, taxonomy::Category};

/// Axis headroom above the tallest bar.
const HEADROOM: f64 = 1.1;
/// Value labels sit this fraction of the largest count above their bar.
const LABEL_OFFSET: f64 = 0.02;
const MAX_TICKS: usize = 10;

const Y_CAPTION: &str = "Total Event Count";
const X_CAPTION: &str = "Event Type";

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub label: &'static str,
    pub color: Color,
    pub value: u64,
    /// Data-space height at which the value label's baseline sits.
    pub label_y: f64,
}

/// Chart geometry in data space, independent of the terminal size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub y_max: f64,
    pub bars: Vec<BarLayout>,
}

impl ChartLayout {
    /// `None` when there is nothing to draw.
    pub fn new(counts: &[u64], categories: &[Category]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let max = counts.iter().copied().max().unwrap_or(0) as f64;
        // +1 keeps an all-zero chart from collapsing to a zero-height axis.
        let y_max = max * HEADROOM + 1.0;
        let offset = max * LABEL_OFFSET;

        let bars = categories
            .iter()
            .zip(counts)
            .map(|(cat, &value)| BarLayout {
                label: cat.label,
                color: cat.color,
                value,
                label_y: value as f64 + offset,
            })
            .collect();

        Some(Self { y_max, bars })
    }

    pub fn ticks(&self, max_ticks: usize) -> Vec<u64> {
        integer_ticks(self.y_max, max_ticks)
    }
}

/// Integer tick values from zero up to `upper`, on a 1-2-5 step chosen so
/// that no more than `max_ticks` fit.
pub fn integer_ticks(upper: f64, max_ticks: usize) -> Vec<u64> {
    let max_ticks = max_ticks.max(2) as u64;
    let top = upper.max(0.0).floor() as u64;

    let mut magnitude = 1u64;
    let step = loop {
        if let Some(step) = [1, 2, 5]
            .iter()
            .map(|m| m * magnitude)
            .find(|step| top / step < max_ticks)
        {
            break step;
        }
        magnitude *= 10;
    };

    (0..=top).step_by(step as usize).collect()
}

/// Bar chart of per-category counts with a count axis, gridlines and value
/// labels above each bar.
pub struct CountChart<'a> {
    layout: &'a ChartLayout,
    block: Option<Block<'a>>,
}

impl<'a> CountChart<'a> {
    pub fn new(layout: &'a ChartLayout) -> Self {
        Self {
            layout,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CountChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let n = self.layout.bars.len() as u16;
        // caption row + axis row + labels row + x caption row
        if inner.height < 4 + 2 || n == 0 {
            Paragraph::new("Terminal too small").render(inner, buf);
            return;
        }

        let plot_h = inner.height - 4;
        let ticks = self.layout.ticks(((plot_h / 2) as usize).min(MAX_TICKS));
        let gutter = ticks
            .last()
            .map(|t| t.to_string().len() as u16)
            .unwrap_or(1);

        let axis_x = inner.x + gutter;
        let axis_y = inner.y + 1 + plot_h;
        let plot = Rect::new(
            axis_x + 1,
            inner.y + 1,
            inner.width.saturating_sub(gutter + 1),
            plot_h,
        );

        if plot.width < n {
            Paragraph::new("Terminal too small").render(inner, buf);
            return;
        }

        let dim = Style::default().fg(Color::DarkGray);
        let level = |v: f64| -> u16 {
            (((v / self.layout.y_max) * plot_h as f64).round() as u16).min(plot_h)
        };

        buf.set_string(inner.x, inner.y, Y_CAPTION, dim.add_modifier(Modifier::ITALIC));

        // Axes
        for y in plot.top()..axis_y {
            set_cell(buf, axis_x, y, "│", dim);
        }
        set_cell(buf, axis_x, axis_y, "└", dim);
        for x in plot.left()..plot.right() {
            set_cell(buf, x, axis_y, "─", dim);
        }

        // Ticks and gridlines
        for &tick in &ticks {
            let y = axis_y - level(tick as f64);
            let text = tick.to_string();
            buf.set_string(axis_x - text.len() as u16, y, &text, Style::default());
            if y < axis_y {
                set_cell(buf, axis_x, y, "┤", dim);
                for x in plot.left()..plot.right() {
                    set_cell(buf, x, y, "┄", dim);
                }
            }
        }

        // Bars, value labels, category labels
        let slot = plot.width / n;
        let bar_w = (slot * 2 / 3).max(1);
        for (i, bar) in self.layout.bars.iter().enumerate() {
            let slot_x = plot.x + i as u16 * slot;
            let bar_x = slot_x + (slot - bar_w) / 2;
            let style = Style::default().fg(bar.color);

            let filled = level(bar.value as f64);
            for y in (axis_y - filled)..axis_y {
                for x in bar_x..bar_x + bar_w {
                    set_cell(buf, x, y, "█", style);
                }
            }

            let label_row = (axis_y - level(bar.label_y).max(filled))
                .saturating_sub(1)
                .max(plot.top());
            let value = bar.value.to_string();
            let bold = Style::default().add_modifier(Modifier::BOLD);
            put_centered(buf, slot_x, slot, label_row, &value, bold);
            put_centered(buf, slot_x, slot, axis_y + 1, bar.label, style);
        }

        let caption = dim.add_modifier(Modifier::ITALIC);
        put_centered(buf, plot.x, plot.width, axis_y + 2, X_CAPTION, caption);
    }
}

fn set_cell(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

/// Write `text` centred in the `width` columns starting at `x`, cut to fit.
fn put_centered(buf: &mut Buffer, x: u16, width: u16, y: u16, text: &str, style: Style) {
    let fit = width.saturating_sub(1).max(1) as usize;
    let shown: String = text.chars().take(fit).collect();
    let len = shown.chars().count() as u16;
    let start = x + width.saturating_sub(len) / 2;
    buf.set_stringn(start, y, &shown, fit, style);
}

/// Draw one full tick: the titled chart and a status line beneath it.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    categories: &[Category],
    title: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // status
        ])
        .split(area);

    let block = Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);

    match ChartLayout::new(snapshot.counts(), categories) {
        Some(layout) => frame.render_widget(CountChart::new(&layout).block(block), chunks[0]),
        None => frame.render_widget(block, chunks[0]),
    }

    let status = match &snapshot.issue {
        Some(issue) => Line::from(Span::styled(
            format!(" ⚠ {issue}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!(
                " {} lines, {} unclassified · q to quit",
                snapshot.tally.lines,
                snapshot.tally.unclassified()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), chunks[1]);
}
