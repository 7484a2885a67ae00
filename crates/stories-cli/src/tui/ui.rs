//! Drawing for the article browser.
//!
//! The grid fills the screen with a footer for the status line, the session timer and the key
//! help. An open preview is drawn over it as a centered panel, the way the site's modal covers
//! the page.

use ratatui::{
  layout::{Constraint, Flex, Layout, Rect},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
  Frame,
};
use stories::modal::{plain_text, Region};

use super::{state::Browser, styles::Palette, *};

/// Draws the whole screen.
pub fn draw<S: ArticleSource, C: SnapshotCache>(frame: &mut Frame, browser: &mut Browser<S, C>) {
  let palette = styles::palette(browser.theme());
  frame.render_widget(Block::default().style(palette.base), frame.area());

  let [grid, footer] =
    Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(frame.area());
  draw_grid(frame, browser, &palette, grid);
  draw_footer(frame, browser, &palette, footer);

  if browser.modal_open() {
    draw_preview(frame, browser, &palette);
  }
  browser.needs_redraw = false;
}

/// Draws the card list.
fn draw_grid<S: ArticleSource, C: SnapshotCache>(
  frame: &mut Frame,
  browser: &mut Browser<S, C>,
  palette: &Palette,
  area: Rect,
) {
  let items: Vec<ListItem> = browser
    .cards
    .iter()
    .map(|card| {
      let mut lines = vec![Line::from(Span::styled(card.title.clone(), palette.title))];
      if !card.meta.is_empty() {
        lines.push(Line::from(Span::styled(card.meta.clone(), palette.muted)));
      }
      if !card.excerpt.is_empty() {
        lines.push(Line::from(Span::styled(card.excerpt.clone(), palette.normal)));
      }
      ListItem::new(lines)
    })
    .collect();

  let title = if items.is_empty() {
    " Stories (none available) ".to_string()
  } else {
    format!(" Stories ({}) ", items.len())
  };
  let list = List::new(items)
    .block(
      Block::default()
        .title(Span::styled(title, palette.title))
        .borders(Borders::ALL)
        .border_style(palette.border),
    )
    .highlight_style(palette.highlight)
    .highlight_symbol("▶ ");

  frame.render_stateful_widget(list, area, &mut browser.selected);
}

/// Draws the status line and key help.
fn draw_footer<S: ArticleSource, C: SnapshotCache>(
  frame: &mut Frame,
  browser: &Browser<S, C>,
  palette: &Palette,
  area: Rect,
) {
  let [status, help] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

  let mut status_line = vec![Span::styled(browser.countdown.label(), palette.muted)];
  if let Some(message) = &browser.status {
    status_line.push(Span::styled(" • ", palette.muted));
    status_line.push(Span::styled(message.clone(), palette.normal));
  }
  frame.render_widget(Paragraph::new(Line::from(status_line)), status);

  let keys: &[(&str, &str)] = if browser.modal_open() {
    &[("↑↓", "scroll"), ("+/-", "text"), ("s", "speak"), ("esc", "close"), ("b/f", "history")]
  } else {
    &[("↑↓", "move"), ("enter", "open"), ("b/f", "history"), ("t", "theme"), ("q", "quit")]
  };
  let mut spans = Vec::new();
  for (i, (key, action)) in keys.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" • ", palette.muted));
    }
    spans.push(Span::styled(*key, palette.key));
    spans.push(Span::styled(format!(":{action}"), palette.muted));
  }
  frame.render_widget(Paragraph::new(Line::from(spans)), help);
}

/// Draws the open article over the grid.
fn draw_preview<S: ArticleSource, C: SnapshotCache>(
  frame: &mut Frame,
  browser: &Browser<S, C>,
  palette: &Palette,
) {
  let modal = browser.navigator.modal();
  let surface = modal.surface();
  let area = centered(frame.area(), 80, 80);

  let title = surface.text(Region::Title).unwrap_or_default();
  let mut lines = vec![
    Line::from(Span::styled(title, palette.title)),
    Line::from(Span::styled(surface.text(Region::Meta).unwrap_or_default(), palette.muted)),
  ];
  if let Some(src) = surface.region(Region::HeroImage).and_then(|hero| hero.src.as_deref()) {
    if !src.is_empty() {
      lines.push(Line::from(Span::styled(format!("Image: {src}"), palette.muted)));
    }
  }
  lines.push(Line::from(""));
  for paragraph in plain_text(surface.markup(Region::Body).unwrap_or_default()).lines() {
    lines.push(Line::from(Span::styled(paragraph.to_string(), palette.normal)));
    lines.push(Line::from(""));
  }

  let block = Block::default()
    .title(Span::styled(format!(" Preview · text {}x ", modal.text_scale()), palette.title))
    .borders(Borders::ALL)
    .border_style(palette.border)
    .style(palette.base);

  frame.render_widget(Clear, area);
  frame.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }).scroll((browser.scroll, 0)),
    area,
  );
}

/// A rectangle of the given percentage size centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [area] = Layout::horizontal([Constraint::Percentage(width)]).flex(Flex::Center).areas(area);
  let [area] = Layout::vertical([Constraint::Percentage(height)]).flex(Flex::Center).areas(area);
  area
}
