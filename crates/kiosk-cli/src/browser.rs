use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap,
};
use ratatui::{Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

use kiosk_core::debounce::Debouncer;
use kiosk_core::grid::{Batch, GridLayout, GridPager};
use kiosk_core::progress::{self, Preloader};
use kiosk_core::search::{tokenize, SearchIndex, Selection};
use kiosk_core::{hero, PostSummary, Source};

use crate::config::{self, Settings};
use crate::copy_helpers;
use crate::theme::{self, Theme};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);
const CARD_HEIGHT: u16 = 5;
const TOAST_DWELL: Duration = Duration::from_millis(1500);

pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

pub struct RealEventSource;

impl EventSource for RealEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

pub fn run_browser_default(source: &dyn Source, settings: &Settings) -> Result<()> {
    let mut es = RealEventSource;
    let _ = run_browser_with(source, settings, &mut es, true)?;
    Ok(())
}

enum Phase {
    Splash {
        preloader: Preloader,
        started: Instant,
        next_tick: Instant,
        done_at: Option<Instant>,
    },
    Ready,
}

#[derive(Default)]
struct Overlay {
    open: bool,
    query: String,
    results: Vec<usize>,
    selection: Selection,
}

impl Overlay {
    /// Opening clears the query, empties the results, and drops the cursor.
    fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.results.clear();
        self.selection.reset();
    }

    fn close(&mut self) {
        self.open = false;
        self.selection.reset();
    }

    /// Re-filter on every query change; the cursor resets with the list.
    fn refilter(&mut self, index: &SearchIndex) {
        self.results = index.filter(&self.query);
        self.selection.reset();
    }
}

struct Browser {
    posts: Vec<PostSummary>,
    grid_posts: Vec<PostSummary>,
    index: SearchIndex,
    pager: GridPager,
    layout: GridLayout,
    width: Option<u16>,
    reveal_at: Vec<Option<Instant>>,
    scroll_row: usize,
    overlay: Overlay,
    toast: Option<(String, Instant)>,
    banner: Option<String>,
    theme: Theme,
    phase: Phase,
}

impl Browser {
    fn columns(&self) -> usize {
        self.layout.columns(self.width)
    }

    fn apply_batch(&mut self, batch: &Batch, now: Instant) {
        for i in batch.range.clone() {
            self.reveal_at[i] = Some(now + batch.reveal_delay(i));
        }
    }

    fn show_toast(&mut self, msg: impl Into<String>, now: Instant) {
        self.toast = Some((msg.into(), now + TOAST_DWELL));
    }
}

/// Drives the browser until the user quits. With `draw` off, the loop runs
/// headless against a fake event source and returns the URL the user
/// activated (if any) instead of opening it.
pub fn run_browser_with(
    source: &dyn Source,
    settings: &Settings,
    es: &mut dyn EventSource,
    draw: bool,
) -> Result<Option<String>> {
    // The one-shot load. Failure is a diagnostic, never fatal: the browser
    // comes up with an empty hero, empty grid, and inert search.
    let posts = match source.load() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("catalog unavailable: {e}");
            Vec::new()
        }
    };
    // Grid and search keep independent local copies of the catalog.
    let grid_posts: Vec<PostSummary> = kiosk_core::grid_items(&posts).to_vec();
    let index = SearchIndex::new(posts.clone());
    let pager = GridPager::new(grid_posts.len());
    let reveal_at = vec![None; grid_posts.len()];

    let banner = if draw {
        let state = hero::SessionState::new(config::session_path());
        let n = hero::rotate_banner(&state, &mut rand::thread_rng(), settings.banner_count());
        Some(hero::banner_name(n))
    } else {
        None
    };

    let mut terminal = if draw {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Some(Terminal::new(backend)?)
    } else {
        None
    };
    let width = terminal
        .as_ref()
        .and_then(|t| t.size().ok())
        .map(|s| s.width);

    let now = Instant::now();
    let phase = if draw && settings.splash() {
        Phase::Splash {
            preloader: Preloader::new(),
            started: now,
            next_tick: now + progress::TICK,
            done_at: None,
        }
    } else {
        Phase::Ready
    };

    let mut app = Browser {
        posts,
        grid_posts,
        index,
        pager,
        layout: GridLayout::default(),
        width,
        reveal_at,
        scroll_row: 0,
        overlay: Overlay::default(),
        toast: None,
        banner,
        theme: theme::load_theme(),
        phase,
    };
    let mut resize = Debouncer::new(settings.resize_debounce());
    let mut picked: Option<String> = None;

    if matches!(app.phase, Phase::Ready) {
        let batch = app.pager.show_next_batch(app.columns());
        app.apply_batch(&batch, Instant::now());
    }

    'outer: loop {
        let now = Instant::now();

        let mut splash_done = false;
        if let Phase::Splash {
            ref mut preloader,
            started,
            ref mut next_tick,
            ref mut done_at,
        } = app.phase
        {
            match *done_at {
                None => {
                    if now >= *next_tick {
                        preloader.tick(&mut rand::thread_rng());
                        *next_tick = now + progress::TICK;
                    }
                    // The catalog load already resolved; let the bar climb
                    // for a few ticks before snapping to 100.
                    if now.duration_since(started) >= progress::DISMISS_AFTER {
                        preloader.finish();
                        *done_at = Some(now);
                    }
                }
                Some(t) => splash_done = now >= t + progress::DISMISS_AFTER,
            }
        }
        if splash_done {
            app.phase = Phase::Ready;
            let batch = app.pager.show_next_batch(app.columns());
            app.apply_batch(&batch, now);
        }

        if resize.fire_at(now) {
            let batch = app.pager.resize(app.columns());
            app.apply_batch(&batch, now);
        }

        if let Some((_, until)) = &app.toast {
            if now > *until {
                app.toast = None;
            }
        }

        if let Some(ref mut term) = terminal {
            term.draw(|f| app.render(f, now))?;
        }

        if let Some(ev) = es.poll(POLL_TIMEOUT)? {
            match ev {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl && matches!(k.code, KeyCode::Char('c')) {
                        break 'outer;
                    }
                    if matches!(app.phase, Phase::Splash { .. }) {
                        if matches!(k.code, KeyCode::Esc | KeyCode::Char('q')) {
                            break 'outer;
                        }
                        continue;
                    }
                    if app.overlay.open {
                        match k.code {
                            KeyCode::Esc => app.overlay.close(),
                            KeyCode::Down => {
                                app.overlay.selection.down(app.overlay.results.len())
                            }
                            KeyCode::Up => app.overlay.selection.up(app.overlay.results.len()),
                            KeyCode::Enter => {
                                let hit = app
                                    .overlay
                                    .selection
                                    .index()
                                    .and_then(|s| app.overlay.results.get(s).copied());
                                if let Some(post_idx) = hit {
                                    let url = app.index.posts()[post_idx].url.clone();
                                    if !draw {
                                        picked = Some(url);
                                        break 'outer;
                                    }
                                    if let Err(e) = open::that(&url) {
                                        tracing::warn!("failed to open {url}: {e}");
                                    }
                                    app.show_toast(format!("Opening {url}"), now);
                                    app.overlay.close();
                                }
                            }
                            KeyCode::Backspace => {
                                app.overlay.query.pop();
                                app.overlay.refilter(&app.index);
                            }
                            KeyCode::Char(ch) if !ctrl => {
                                app.overlay.query.push(ch);
                                app.overlay.refilter(&app.index);
                            }
                            _ => {}
                        }
                    } else {
                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => break 'outer,
                            KeyCode::Char('k') if ctrl => app.overlay.open(),
                            KeyCode::Enter | KeyCode::Char('l') => {
                                if app.pager.load_more_visible() {
                                    let batch = app.pager.load_more(app.columns());
                                    app.apply_batch(&batch, now);
                                }
                            }
                            KeyCode::Char('c') => {
                                if let Some(p) = kiosk_core::hero_post(&app.posts) {
                                    match copy_helpers::copy_text(&p.url) {
                                        Ok(()) => app.show_toast("Copied!", now),
                                        Err(e) => tracing::warn!("copy failed: {e}"),
                                    }
                                }
                            }
                            KeyCode::Char('o') => {
                                if let Some(p) = kiosk_core::hero_post(&app.posts) {
                                    if let Err(e) = open::that(&p.url) {
                                        tracing::warn!("failed to open {}: {e}", p.url);
                                    }
                                }
                            }
                            KeyCode::Up => app.scroll_row = app.scroll_row.saturating_sub(1),
                            KeyCode::Down => app.scroll_row += 1,
                            KeyCode::PageUp => app.scroll_row = app.scroll_row.saturating_sub(3),
                            KeyCode::PageDown => app.scroll_row += 3,
                            _ => {}
                        }
                    }
                }
                Event::Resize(w, _) => {
                    app.width = Some(w);
                    resize.trigger_at(now);
                }
                _ => {}
            }
        }
    }

    if draw {
        disable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    }
    Ok(picked)
}

impl Browser {
    fn render(&self, f: &mut Frame, now: Instant) {
        if let Phase::Splash { preloader, .. } = &self.phase {
            let area = centered_rect(f.area(), 50, 3);
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" booting ")
                        .border_style(Style::default().fg(self.theme.border_fg)),
                )
                .gauge_style(Style::default().fg(self.theme.accent_fg))
                .percent(preloader.percent());
            f.render_widget(gauge, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(3),
            ])
            .split(f.area());
        self.render_hero(f, chunks[0]);
        self.render_grid(f, chunks[1], now);
        self.render_footer(f, chunks[2], now);
        if self.overlay.open {
            self.render_overlay(f);
        }
    }

    fn render_hero(&self, f: &mut Frame, area: Rect) {
        let dim = Style::default().add_modifier(Modifier::DIM);
        let title = match &self.banner {
            Some(b) => format!(" featured — {} ", b),
            None => " featured ".to_string(),
        };
        let lines: Vec<Line> = match kiosk_core::hero_post(&self.posts) {
            Some(p) => vec![
                Line::from(format!("{} | {}", p.category, p.date)).style(dim),
                Line::from(p.title.clone()).style(
                    Style::default()
                        .fg(self.theme.accent_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(p.description.clone()),
            ],
            None => vec![Line::from("catalog offline").style(dim)],
        };
        let hero = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(self.theme.accent_fg)),
            );
        f.render_widget(hero, area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect, now: Instant) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " posts {}/{} ",
                self.pager.displayed(),
                self.pager.total()
            ))
            .border_style(Style::default().fg(self.theme.border_fg));
        let inner = outer.inner(area);
        f.render_widget(outer, area);
        if inner.height < CARD_HEIGHT || self.pager.displayed() == 0 {
            return;
        }

        let cols = self.columns();
        let visible = &self.grid_posts[..self.pager.displayed()];
        let total_rows = visible.len().div_ceil(cols);
        let rows_fit = (inner.height / CARD_HEIGHT) as usize;
        let scroll = self.scroll_row.min(total_rows.saturating_sub(rows_fit));

        for (r, row) in visible
            .chunks(cols)
            .enumerate()
            .skip(scroll)
            .take(rows_fit)
        {
            let y = inner.y + ((r - scroll) as u16) * CARD_HEIGHT;
            let row_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(row_area);
            for (c, post) in row.iter().enumerate() {
                let item = r * cols + c;
                // Cards inside a freshly revealed batch stay dimmed until
                // their cascade instant passes.
                let settled = matches!(self.reveal_at[item], Some(t) if now >= t);
                let style = if settled {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                let card = Paragraph::new(vec![
                    Line::from(post.category.clone())
                        .style(Style::default().add_modifier(Modifier::DIM)),
                    Line::from(post.title.clone())
                        .style(Style::default().fg(self.theme.accent_fg)),
                    Line::from(post.short_desc.clone()),
                ])
                .style(style)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.border_fg)),
                );
                f.render_widget(card, cells[c]);
            }
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, now: Instant) {
        let ln1 = "Ctrl+K search | Enter/l load more | c copy link | o open | ↑/↓ scroll | q quit";
        let mut ln2 = format!(
            "{} of {} posts shown",
            self.pager.displayed(),
            self.pager.total()
        );
        if self.pager.load_more_visible() {
            ln2.push_str(" | more available…");
        }
        if let Some((msg, until)) = &self.toast {
            if now <= *until {
                ln2.push_str(&format!("  — {}", msg));
            }
        }
        let footer = Paragraph::new(vec![Line::raw(ln1), Line::raw(ln2)])
            .style(Style::default().fg(self.theme.help_fg))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_fg)),
            );
        f.render_widget(footer, area);
    }

    fn render_overlay(&self, f: &mut Frame) {
        let area = centered_rect(f.area(), 70, 0);
        f.render_widget(Clear, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let input = Paragraph::new(self.overlay.query.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" search — type to filter ")
                .border_style(Style::default().fg(self.theme.accent_fg)),
        );
        f.render_widget(input, chunks[0]);

        let results_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_fg));
        if self.overlay.results.is_empty() {
            let msg = if tokenize(&self.overlay.query).is_empty() {
                ""
            } else {
                "No intels found."
            };
            let placeholder = Paragraph::new(msg)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(results_block);
            f.render_widget(placeholder, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .overlay
                .results
                .iter()
                .filter_map(|&i| self.index.posts().get(i))
                .map(|p| {
                    ListItem::new(vec![
                        Line::from(format!("{} | {}", p.category, p.date))
                            .style(Style::default().add_modifier(Modifier::DIM)),
                        Line::from(p.title.clone()),
                    ])
                })
                .collect();
            let list = List::new(items).block(results_block).highlight_style(
                Style::default()
                    .fg(self.theme.highlight_fg)
                    .bg(self.theme.highlight_bg),
            );
            f.render_stateful_widget(
                list,
                chunks[1],
                &mut ListState::default().with_selected(self.overlay.selection.index()),
            );
        }

        let hint = Paragraph::new("Esc close | ↑/↓ move | Enter open")
            .style(Style::default().fg(self.theme.help_fg));
        f.render_widget(hint, chunks[2]);
    }
}

/// Overlay/splash placement: centered horizontally at `percent_x` width;
/// `height` of 0 means 70% of the screen height.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let h = if height == 0 {
        area.height.saturating_mul(7) / 10
    } else {
        height
    };
    let w = area.width.saturating_mul(percent_x) / 100;
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h.min(area.height))
}
