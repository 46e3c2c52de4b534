//! Application state and TUI event loop
//!
//! The browser has three panes: the Imports list on the left, and on the
//! right the Info box, the Packages list and the Import Path of the
//! selected package. The `App` owns the loaded dependencies and is the
//! only place where the visibility filters change.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use super::DisplayOptions;
use crate::analysis::LoadedDeps;
use crate::filter::DepEntry;
use crate::graph::{resolve_path, ImportGraph};

const ROOT_COLOR: Color = Color::Rgb(52, 152, 219);
const TARGET_COLOR: Color = Color::Rgb(211, 84, 0);
const ARROW_COLOR: Color = Color::Rgb(0, 177, 79);
const FOOTER_COUNT_COLOR: Color = Color::Rgb(0, 83, 57);
const FOOTER_KEYS_COLOR: Color = Color::Rgb(60, 115, 168);

const HELP_TEXT: &str = "Browse dependencies using the arrow keys, then tab to the Packages \
window to see the import path for a specific package.\n\nUse 'f' to search for a specific \
package or 0-9 to quickly filter packages by type. Press 'r' to reset the filter.\n\nPackages \
are coloured and sorted according to the type of dependency shown in the Info window.";

/// The pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Imports,
    Packages,
    ImportPath,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Imports => Focus::Packages,
            Focus::Packages => Focus::ImportPath,
            Focus::ImportPath => Focus::Imports,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Imports => Focus::ImportPath,
            Focus::Packages => Focus::Imports,
            Focus::ImportPath => Focus::Packages,
        }
    }
}

/// Which overlay, if any, is capturing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Find,
    Help,
}

/// The import chain shown for the selected package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPath {
    /// Target first, top-level importer last
    pub packages: Vec<String>,
    /// Set when the walk stopped on an import cycle
    pub truncated: bool,
}

impl ImportPath {
    fn resolve(inverted: &ImportGraph, target: &str) -> Self {
        match resolve_path(inverted, target) {
            Ok(packages) => Self {
                packages,
                truncated: false,
            },
            Err(err) => {
                debug!(%err, target, "import path truncated");
                Self {
                    packages: err.partial_path().to_vec(),
                    truncated: true,
                }
            }
        }
    }

    fn line_count(&self) -> usize {
        let arrows = self.packages.len().saturating_sub(1);
        self.packages.len() + arrows + usize::from(self.truncated)
    }
}

/// Application state
pub struct App {
    deps: LoadedDeps,
    options: DisplayOptions,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Active overlay
    pub mode: Mode,
    /// Text typed into the find box
    pub search_input: String,
    /// Whether the application should quit
    pub should_quit: bool,
    imports_state: ListState,
    packages_state: ListState,
    packages: Vec<String>,
    import_path: ImportPath,
    path_scroll: u16,
}

impl App {
    /// Creates the browser with the first dependency selected.
    pub fn new(deps: LoadedDeps, options: DisplayOptions) -> Self {
        let mut app = Self {
            deps,
            options,
            focus: Focus::default(),
            mode: Mode::default(),
            search_input: String::new(),
            should_quit: false,
            imports_state: ListState::default(),
            packages_state: ListState::default(),
            packages: Vec::new(),
            import_path: ImportPath::default(),
            path_scroll: 0,
        };
        app.select_import(0);
        app
    }

    pub fn deps(&self) -> &LoadedDeps {
        &self.deps
    }

    /// Contents of the Packages pane.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Contents of the Import Path pane.
    pub fn import_path(&self) -> &ImportPath {
        &self.import_path
    }

    /// The highlighted entry of the Imports pane.
    pub fn selected_import(&self) -> Option<&DepEntry> {
        self.imports_state
            .selected()
            .and_then(|index| self.deps.entries.visible_at(index))
    }

    /// The highlighted package of the Packages pane.
    pub fn selected_package(&self) -> Option<&str> {
        self.packages_state
            .selected()
            .and_then(|index| self.packages.get(index))
            .map(String::as_str)
    }

    /// Selects the `index`-th visible import and refreshes the dependent panes.
    ///
    /// A module entry lists its member packages; any other entry lists
    /// itself. The first package is selected in turn.
    pub fn select_import(&mut self, index: usize) {
        let count = self.deps.entries.visible_count();
        if count == 0 {
            self.imports_state.select(None);
            self.packages.clear();
            self.select_package(0);
            return;
        }

        let index = index.min(count - 1);
        self.imports_state.select(Some(index));
        self.packages = match self.deps.entries.visible_at(index) {
            Some(entry) => {
                let children = self.deps.modules.children_of(&entry.package);
                if children.is_empty() {
                    vec![entry.package.clone()]
                } else {
                    children.into_iter().map(String::from).collect()
                }
            }
            None => Vec::new(),
        };
        self.select_package(0);
    }

    /// Selects a package in the Packages pane and resolves its import path.
    pub fn select_package(&mut self, index: usize) {
        self.path_scroll = 0;
        if self.packages.is_empty() {
            self.packages_state.select(None);
            self.import_path = ImportPath::default();
            return;
        }

        let index = index.min(self.packages.len() - 1);
        self.packages_state.select(Some(index));
        self.import_path = ImportPath::resolve(&self.deps.inverted, &self.packages[index]);
    }

    fn move_selection(&mut self, target: impl FnOnce(usize, usize) -> usize) {
        match self.focus {
            Focus::Imports => {
                let count = self.deps.entries.visible_count();
                if let Some(current) = self.imports_state.selected() {
                    let next = target(current, count).min(count.saturating_sub(1));
                    if next != current {
                        self.select_import(next);
                    }
                }
            }
            Focus::Packages => {
                let count = self.packages.len();
                if let Some(current) = self.packages_state.selected() {
                    let next = target(current, count).min(count.saturating_sub(1));
                    if next != current {
                        self.select_package(next);
                    }
                }
            }
            Focus::ImportPath => {
                let lines = self.import_path.line_count();
                let next = target(usize::from(self.path_scroll), lines);
                let next = next.min(lines.saturating_sub(1));
                self.path_scroll = u16::try_from(next).unwrap_or(u16::MAX);
            }
        }
    }

    /// Move selection to the next item in the focused pane
    pub fn select_next(&mut self) {
        self.move_selection(|current, _| current.saturating_add(1));
    }

    /// Move selection to the previous item in the focused pane
    pub fn select_previous(&mut self) {
        self.move_selection(|current, _| current.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.move_selection(|_, _| 0);
    }

    pub fn select_last(&mut self) {
        self.move_selection(|_, count| count.saturating_sub(1));
    }

    /// Shows only dependencies whose category priority equals `priority`.
    pub fn filter_by_priority(&mut self, priority: i32) {
        self.deps.entries.filter_by_priority(priority);
        self.select_import(0);
    }

    /// Shows every dependency again.
    pub fn reset_filter(&mut self) {
        self.deps.entries.reset();
        self.select_import(0);
    }

    /// Applies a substring filter and returns to browsing.
    pub fn submit_search(&mut self, query: &str) {
        debug!(query, "find");
        self.deps.entries.filter_by_substring(query);
        self.mode = Mode::Browse;
        self.focus = Focus::Imports;
        self.select_import(0);
    }

    /// Signal that the application should quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Dispatches one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            // any key closes the help screen
            Mode::Help => self.mode = Mode::Browse,
            Mode::Find => match key.code {
                KeyCode::Enter => {
                    let query = std::mem::take(&mut self.search_input);
                    self.submit_search(&query);
                }
                KeyCode::Esc => {
                    self.search_input.clear();
                    self.mode = Mode::Browse;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char(c) => self.search_input.push(c),
                _ => {}
            },
            Mode::Browse => match key.code {
                KeyCode::Char(c @ '0'..='9') => self.filter_by_priority(i32::from(c as u8 - b'0')),
                KeyCode::Char('r') => self.reset_filter(),
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('f') => {
                    self.search_input.clear();
                    self.mode = Mode::Find;
                }
                KeyCode::Char('h') => self.mode = Mode::Help,
                KeyCode::Tab | KeyCode::Right => self.focus = self.focus.next(),
                KeyCode::BackTab | KeyCode::Left => self.focus = self.focus.previous(),
                KeyCode::Char('j') | KeyCode::Down => self.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
                KeyCode::Home | KeyCode::Char('g') => self.select_first(),
                KeyCode::End | KeyCode::Char('G') => self.select_last(),
                _ => {}
            },
        }
    }
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Info
            Constraint::Fill(1),   // Packages
            Constraint::Fill(2),   // Import Path
        ])
        .split(body[1]);

    render_header(frame, app, chunks[0]);
    render_imports(frame, app, body[0]);
    render_info(frame, app, side[0]);
    render_packages(frame, app, side[1]);
    render_import_path(frame, app, side[2]);
    render_footer(frame, app, chunks[2]);

    match app.mode {
        Mode::Browse => {}
        Mode::Find => render_find(frame, app),
        Mode::Help => render_help(frame, app),
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused { Color::Yellow } else { Color::Gray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "  showdeps",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::styled(app.deps.root().to_string(), Style::default().fg(Color::Yellow)),
    ];
    if !app.deps.cycles.is_empty() {
        spans.push(Span::styled(
            format!("  [{} import cycles]", app.deps.cycles.len()),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_imports(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .deps
        .entries
        .visible()
        .map(|entry| {
            let name = app.options.display_name(&entry.package).into_owned();
            ListItem::new(Span::styled(
                name,
                Style::default().fg(entry.category.display_color()),
            ))
        })
        .collect();

    let title = format!(
        "Imports ({}/{})",
        app.deps.entries.visible_count(),
        app.deps.entries.len()
    );
    let list = List::new(items)
        .block(pane_block(title, app.focus == Focus::Imports))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.imports_state);
}

fn render_info(frame: &mut Frame, app: &App, area: Rect) {
    let category = app
        .selected_import()
        .and_then(|entry| app.deps.entries.category_of(&entry.package));
    let lines = match category {
        Some(category) => vec![
            Line::from(Span::styled(
                category.label.clone(),
                Style::default().fg(category.display_color()),
            )),
            Line::from(Span::styled(
                format!("priority {}", category.priority),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "no dependency selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default().title("Info").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_packages(frame: &mut Frame, app: &mut App, area: Rect) {
    // members of a module share the module's color
    let color = app
        .selected_import()
        .map_or(Color::White, |entry| entry.category.display_color());

    let items: Vec<ListItem> = app
        .packages
        .iter()
        .map(|pkg| {
            let name = app.options.display_name(pkg).into_owned();
            ListItem::new(Span::styled(name, Style::default().fg(color)))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(
            "Packages".to_string(),
            app.focus == Focus::Packages,
        ))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.packages_state);
}

fn import_path_lines(path: &ImportPath, options: &DisplayOptions) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(path.line_count());
    if path.truncated {
        lines.push(Line::from(Span::styled(
            "import cycle, path truncated",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let last = path.packages.len().saturating_sub(1);
    for (i, pkg) in path.packages.iter().rev().enumerate() {
        let style = if i == 0 {
            Style::default().fg(ROOT_COLOR)
        } else if i == last {
            Style::default().fg(TARGET_COLOR)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            options.display_name(pkg).into_owned(),
            style,
        )));
        if i < last {
            lines.push(Line::from(Span::styled("↓", Style::default().fg(ARROW_COLOR))));
        }
    }
    lines
}

fn render_import_path(frame: &mut Frame, app: &App, area: Rect) {
    let lines = import_path_lines(&app.import_path, &app.options);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((app.path_scroll, 0))
        .block(pane_block(
            "Import Path".to_string(),
            app.focus == Focus::ImportPath,
        ));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {} deps found. ", app.deps.entries.len()),
            Style::default()
                .fg(FOOTER_COUNT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "(h)elp (f)ind (r)eset (q)uit (0-9):filter by type",
            Style::default().fg(FOOTER_KEYS_COLOR),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// A rectangle of `height` rows and `width_percent` of the width, centered in `area`.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let margin = (100 - width_percent.min(100)) / 2;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(margin),
        ])
        .split(vertical[1])[1]
}

fn render_find(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 3, frame.area());
    let content = Line::from(vec![
        Span::raw(app.search_input.clone()),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);
    let input = Paragraph::new(content).block(
        Block::default()
            .title("Find package (Enter to apply, Esc to cancel)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(input, area);
}

fn render_help(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 12, frame.area());
    let priorities: Vec<String> = app
        .deps
        .entries
        .priorities()
        .iter()
        .map(i32::to_string)
        .collect();

    let text = vec![
        Line::from(HELP_TEXT),
        Line::from(""),
        Line::from(Span::styled(
            format!("Priorities in use: {}", priorities.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let help = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Help (any key to close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}
