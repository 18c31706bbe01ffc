//! Interactive TUI browser for Waypoint.
//!
//! Provides a small file browser that exercises the whole navigation
//! layer:
//! - Breadcrumb header; clicking a path segment jumps to that ancestor
//! - Entering a directory applies virtual-directory dereferencing
//! - Opening an entry applies shortcut resolution
//! - The virtual drives/folders pane, reachable with `o` or by going up
//!   from a top-level directory

use crate::app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use waypoint_core::{build_virtual_listing, Breadcrumb, Config, VirtualListing};

/// One entry of a real directory listing.
struct Entry {
    /// Filename
    name: String,

    /// Full path
    path: PathBuf,

    /// True for directories
    is_dir: bool,
}

/// What the browser is currently showing.
enum Location {
    /// A real directory, with the breadcrumb as source of truth
    Directory {
        crumb: Breadcrumb,
        entries: Vec<Entry>,
    },

    /// The synthetic drives/special-folders pane (read-only)
    VirtualPane { listing: VirtualListing },
}

/// TUI application state.
struct TuiApp {
    /// The main application
    app: App,

    /// Current location
    location: Location,

    /// Selected line index
    selected: usize,

    /// Vertical scroll offset
    scroll_offset: usize,

    /// Whether we should quit
    should_quit: bool,

    /// Status message
    status_message: Option<String>,

    /// Show the full path instead of the truncated rendering
    full_breadcrumb: bool,

    /// Breadcrumb string as last drawn (formatting-free), for click mapping
    rendered_crumb: String,

    /// Screen area of the breadcrumb, recorded at draw time
    crumb_area: Rect,
}

impl TuiApp {
    fn new(app: App, start: &Path) -> Self {
        let mut tui_app = TuiApp {
            app,
            location: Location::VirtualPane {
                listing: VirtualListing::default(),
            },
            selected: 0,
            scroll_offset: 0,
            should_quit: false,
            status_message: None,
            full_breadcrumb: false,
            rendered_crumb: String::new(),
            crumb_area: Rect::default(),
        };
        tui_app.enter_directory(start);
        tui_app
    }

    /// Number of lines at the current location.
    fn line_count(&self) -> usize {
        match &self.location {
            Location::Directory { entries, .. } => entries.len(),
            Location::VirtualPane { listing } => listing.len(),
        }
    }

    /// Open (or refresh) the virtual drives/folders pane.
    ///
    /// A bridge failure is reported in the status bar and leaves the
    /// current location untouched.
    fn open_virtual_pane(&mut self) {
        match build_virtual_listing(self.app.bridge()) {
            Ok(listing) => {
                self.location = Location::VirtualPane { listing };
                self.selected = 0;
                self.scroll_offset = 0;
                self.status_message = None;
            }
            Err(e) => {
                self.status_message = Some(format!("Virtual pane unavailable: {}", e));
            }
        }
    }

    /// Visit a directory, applying virtual-directory dereferencing first.
    fn enter_directory(&mut self, path: &Path) {
        let resolved = self.app.resolver.resolve_directory(path);
        match read_entries(&resolved) {
            Ok(entries) => {
                self.location = Location::Directory {
                    crumb: Breadcrumb::new(resolved.to_string_lossy()),
                    entries,
                };
                self.selected = 0;
                self.scroll_offset = 0;
                self.status_message = None;
            }
            Err(e) => {
                self.status_message = Some(format!("Cannot open {}: {}", resolved.display(), e));
            }
        }
    }

    /// Open the selected line.
    fn open_selected(&mut self) {
        match &self.location {
            Location::VirtualPane { listing } => {
                if listing.is_separator(self.selected) {
                    return;
                }
                // Defer to the normal directory-open path so resolution
                // still applies to the chosen entry
                if let Some(target) = listing.target(self.selected) {
                    let target = target.to_string();
                    self.enter_directory(Path::new(&target));
                }
            }
            Location::Directory { entries, .. } => {
                let Some(entry) = entries.get(self.selected) else {
                    return;
                };
                let path = entry.path.clone();
                let resolved = self.app.resolver.resolve_entry(&path);
                if resolved.is_dir() {
                    self.enter_directory(&resolved);
                } else {
                    self.status_message =
                        Some(format!("Not a directory: {}", resolved.display()));
                }
            }
        }
    }

    /// Go up one directory; from a top-level directory, open the virtual
    /// pane instead of failing.
    fn go_up(&mut self) {
        match &self.location {
            Location::VirtualPane { .. } => self.open_virtual_pane(),
            Location::Directory { crumb, .. } => match parent_of(crumb.path()) {
                Some(parent) => self.enter_directory(Path::new(&parent)),
                None => self.open_virtual_pane(),
            },
        }
    }

    /// Refresh the current location. The virtual pane is always rebuilt
    /// from a fresh enumeration, never re-read as a directory.
    fn refresh(&mut self) {
        match &self.location {
            Location::VirtualPane { .. } => self.open_virtual_pane(),
            Location::Directory { crumb, .. } => {
                let path = crumb.path().to_string();
                self.enter_directory(Path::new(&path));
            }
        }
    }

    /// Toggle the shortcut-follow policy.
    fn toggle_follow(&mut self) {
        let follow = !self.app.resolver.policy().follow;
        self.app.resolver.set_follow(follow);
        self.status_message = Some(if follow {
            "Following shortcuts".to_string()
        } else {
            "Operating on shortcut files themselves".to_string()
        });
    }

    /// Toggle between truncated and full breadcrumb display.
    fn toggle_breadcrumb(&mut self) {
        self.full_breadcrumb = !self.full_breadcrumb;
    }

    /// Handle a left click at screen coordinates.
    fn on_click(&mut self, column: u16, row: u16) {
        // Only the breadcrumb line is clickable
        let inner_x = self.crumb_area.x + 1;
        let inner_y = self.crumb_area.y + 1;
        if row != inner_y || column < inner_x {
            return;
        }
        let offset = (column - inner_x) as usize;

        let target = match &self.location {
            Location::Directory { crumb, .. } => crumb.navigate(&self.rendered_crumb, offset),
            Location::VirtualPane { .. } => None,
        };

        if let Some(target) = target {
            self.enter_directory(Path::new(&target));
        }
    }

    /// Move selection up.
    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_visible();
        }
    }

    /// Move selection down.
    fn select_next(&mut self) {
        if self.selected + 1 < self.line_count() {
            self.selected += 1;
            self.ensure_visible();
        }
    }

    /// Page up.
    fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        self.ensure_visible();
    }

    /// Page down.
    fn page_down(&mut self, page_size: usize) {
        self.selected = (self.selected + page_size).min(self.line_count().saturating_sub(1));
        self.ensure_visible();
    }

    /// Ensure selected item is visible.
    fn ensure_visible(&mut self) {
        // This will be set properly based on visible area
        let visible_height = 20; // Approximate

        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

/// Read and sort the entries of a real directory.
fn read_entries(path: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// Parent directory of a trailing-separator-terminated canonical path.
///
/// Returns `None` for top-level paths ("/" or a drive root like "C:/"),
/// where going up switches to the virtual pane instead.
fn parent_of(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let idx = trimmed.rfind('/')?;
    Some(trimmed[..=idx].to_string())
}

/// Run the TUI application.
pub fn run(config: Config, start: Option<PathBuf>) -> anyhow::Result<()> {
    let app = App::new(config)?;
    let start = match start {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut tui_app = TuiApp::new(app, &start);

    // Main loop
    let result = run_loop(&mut terminal, &mut tui_app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main event loop.
fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut TuiApp) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    KeyCode::Up => {
                        app.select_previous();
                    }
                    KeyCode::Down => {
                        app.select_next();
                    }
                    KeyCode::PageUp => {
                        app.page_up(10);
                    }
                    KeyCode::PageDown => {
                        app.page_down(10);
                    }
                    KeyCode::Home => {
                        app.selected = 0;
                        app.scroll_offset = 0;
                    }
                    KeyCode::End => {
                        if app.line_count() > 0 {
                            app.selected = app.line_count() - 1;
                            app.ensure_visible();
                        }
                    }
                    KeyCode::Enter => {
                        app.open_selected();
                    }
                    KeyCode::Backspace | KeyCode::Char('u') => {
                        app.go_up();
                    }
                    KeyCode::Char('r') => {
                        app.refresh();
                    }
                    KeyCode::Char('o') => {
                        app.open_virtual_pane();
                    }
                    KeyCode::Char('f') => {
                        app.toggle_follow();
                    }
                    KeyCode::Char('b') => {
                        app.toggle_breadcrumb();
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        app.on_click(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

mod ui {
    use super::*;

    /// Draw the UI.
    pub fn draw(f: &mut Frame, app: &mut TuiApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Breadcrumb
                Constraint::Min(10),   // Entries
                Constraint::Length(2), // Status bar
            ])
            .split(f.area());

        draw_breadcrumb(f, app, chunks[0]);
        draw_entries(f, app, chunks[1]);
        draw_status_bar(f, app, chunks[2]);
    }

    /// Draw the breadcrumb header and record its geometry for clicks.
    fn draw_breadcrumb(f: &mut Frame, app: &mut TuiApp, area: Rect) {
        app.crumb_area = area;

        let (title, text) = match &app.location {
            Location::Directory { crumb, .. } => {
                let inner_width = area.width.saturating_sub(2) as usize;
                let margin = app.app.config.ui.reserved_margin;
                let rendered = if app.full_breadcrumb {
                    crumb.path().to_string()
                } else {
                    crumb.render(inner_width.saturating_sub(margin))
                };
                (" Path (click a segment) ", rendered)
            }
            Location::VirtualPane { .. } => {
                (" Virtual pane ", "drives & special folders".to_string())
            }
        };
        app.rendered_crumb = text.clone();

        let header = Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(header, area);
    }

    /// Draw the entry list.
    fn draw_entries(f: &mut Frame, app: &mut TuiApp, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;

        // Update scroll offset based on visible height
        if app.selected >= app.scroll_offset + visible_height {
            app.scroll_offset = app.selected - visible_height + 1;
        }

        let lines: Vec<String> = match &app.location {
            Location::Directory { entries, .. } => entries
                .iter()
                .map(|entry| {
                    let marker = if entry.is_dir { "/" } else { "" };
                    format!("{}{}", entry.name, marker)
                })
                .collect(),
            Location::VirtualPane { listing } => {
                listing.lines().iter().map(|line| line.visible()).collect()
            }
        };

        let items: Vec<ListItem> = lines
            .iter()
            .skip(app.scroll_offset)
            .take(visible_height)
            .enumerate()
            .map(|(i, line)| {
                let style = if i + app.scroll_offset == app.selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(line.as_str()).style(style)
            })
            .collect();

        let title = format!(" {} entries ", lines.len());
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(list, area);
    }

    /// Draw the status bar.
    fn draw_status_bar(f: &mut Frame, app: &TuiApp, area: Rect) {
        let follow = if app.app.resolver.policy().follow {
            "follow"
        } else {
            "literal"
        };

        let status = if let Some(ref msg) = app.status_message {
            msg.clone()
        } else {
            format!(
                "Shortcuts: {} | ↑↓:Navigate Enter:Open u:Up o:Drives r:Refresh f:Follow b:Breadcrumb q:Quit",
                follow
            )
        };

        let status_bar = Paragraph::new(status).style(Style::default().fg(Color::Gray));

        f.render_widget(status_bar, area);
    }
}
