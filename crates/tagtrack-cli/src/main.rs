mod highlight;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    sync::Arc,
};
use tagtrack_config::Config;
use tagtrack_engine::{
    InMemorySurface, RenderSurface, RopeBuffer, SessionError, StatusColor, TagChangeIntent,
    TaggingSession, TextBuffer, io,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Session = TaggingSession<RopeBuffer, InMemorySurface>;

struct App {
    documents_path: PathBuf,
    tag_name: String,
    max_matches: usize,
    files: Vec<PathBuf>,
    file_list_state: ListState,
    session: Option<Session>,
    current_tag: Option<usize>,
    /// 1-based line kept in the middle of the content panel.
    focus_line: usize,
    status: String,
}

impl App {
    fn new(documents_path: PathBuf, tag_name: String, max_matches: usize) -> Result<Self> {
        let files = io::scan_xml_files(&documents_path)?;

        let mut app = Self {
            documents_path,
            tag_name,
            max_matches,
            files,
            file_list_state: ListState::default(),
            session: None,
            current_tag: None,
            focus_line: 1,
            status: String::new(),
        };

        // Select first file if available
        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        self.session = None;
        self.current_tag = None;
        self.focus_line = 1;

        let Some(path) = self
            .file_list_state
            .selected()
            .and_then(|index| self.files.get(index))
        else {
            return;
        };
        let relative = match path
            .strip_prefix(&self.documents_path)
            .map(RelativePathBuf::from_path)
        {
            Ok(Ok(relative)) => relative,
            _ => {
                self.status = format!("Cannot open {}", path.display());
                return;
            }
        };

        match io::load_document(&relative, &self.documents_path) {
            Ok(document) => {
                let mut session = TaggingSession::new(document.buffer, InMemorySurface::new())
                    .with_max_matches(self.max_matches);
                self.status = match session.mark_tags(&self.tag_name) {
                    Ok(count) => format!("{count} <{}> tags in {relative}", self.tag_name),
                    Err(e) => {
                        tracing::warn!(%relative, error = %e, "failed to mark tags");
                        format!("Error marking tags: {e}")
                    }
                };
                self.focus_line = session.surface().revealed_line().unwrap_or(1);
                self.session = Some(session);
            }
            Err(e) => {
                self.status = format!("Error reading file: {e}");
            }
        }
    }

    /// Moves to the next or previous tag, marking the one left behind as done.
    fn step_tag(&mut self, forward: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let count = session.marked().len();
        if count == 0 {
            return;
        }
        let next = match (self.current_tag, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(count - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        if Some(next) == self.current_tag {
            return;
        }

        match advance_tag(session, &mut self.current_tag, next) {
            Ok(()) => {
                self.focus_line = session.marked()[next].range.start_line;
                self.status = format!("Tag {} of {count}", next + 1);
            }
            Err(e) => self.status = format!("Error: {e}"),
        }
    }

    fn show_element(&mut self) {
        let (Some(session), Some(index)) = (self.session.as_ref(), self.current_tag) else {
            return;
        };
        self.status = match session.element_range(index) {
            Ok(range) => format!(
                "Element spans {}:{} to {}:{}",
                range.start_line, range.start_column, range.end_line, range.end_column
            ),
            Err(e) => format!("Error: {e}"),
        };
    }

    fn show_payload(&mut self, intent: TagChangeIntent) {
        let (Some(session), Some(index)) = (self.session.as_ref(), self.current_tag) else {
            return;
        };
        self.status = match session.payload(index, intent).map(|payload| payload.to_json()) {
            Ok(Ok(json)) => json,
            Ok(Err(e)) => format!("Error: {e}"),
            Err(e) => format!("Error: {e}"),
        };
    }

    fn render_document_content(&self, height: usize) -> Vec<Line<'static>> {
        let Some(session) = self.session.as_ref() else {
            return vec![Line::from("Select a file to view its content")];
        };
        let buffer = session.buffer();
        let top = self.focus_line.saturating_sub(height / 2).max(1);
        let bottom = (top + height).min(buffer.line_count() + 1);

        (top..bottom)
            .filter_map(|line_no| {
                let text = buffer.line_content(line_no)?;
                let specs = session.surface().decorations_on_line(line_no);
                Some(highlight::highlight_line(line_no, &text, &specs))
            })
            .collect()
    }
}

/// Marks the tag at `current` done and `next` current.
///
/// `current` only points at `next` once both recolors succeed; after a
/// failure no tag is current.
fn advance_tag<B: TextBuffer, S: RenderSurface>(
    session: &mut TaggingSession<B, S>,
    current: &mut Option<usize>,
    next: usize,
) -> Result<(), SessionError> {
    if let Some(previous) = current.take() {
        session.set_status(previous, StatusColor::Done)?;
    }
    session.set_status(next, StatusColor::Current)?;
    *current = Some(next);
    Ok(())
}

fn init_tracing() {
    let log_path = Config::log_path();
    if let Some(parent) = log_path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(log_file) = File::create(&log_path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagtrack_engine=info,tagtrack_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(Arc::new(log_file)))
        .init();
}

fn main() -> Result<()> {
    // Determine documents path and tag from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [documents-folder-path] [tag-name]", args[0]);
            process::exit(1);
        }
    };

    let (documents_path, from_config) = match (args.get(1), &config) {
        (Some(path), _) => (PathBuf::from(path), false),
        (None, Some(config)) => (config.documents_path.clone(), true),
        (None, None) => {
            eprintln!("Error: No documents path provided and no config file found");
            eprintln!("Usage: {} [documents-folder-path] [tag-name]", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };
    if args.len() > 3 {
        eprintln!("Usage: {} [documents-folder-path] [tag-name]", args[0]);
        process::exit(1);
    }
    let fallback = config.unwrap_or_else(|| Config::new(documents_path.clone()));
    let tag_name = args.get(2).cloned().unwrap_or(fallback.tag_name);

    // Validate documents directory using engine
    if let Err(e) = io::validate_documents_dir(&documents_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Documents path '{}'{} is invalid: {e}",
            documents_path.display(),
            source
        );
        process::exit(1);
    }

    init_tracing();
    tracing::info!(path = %documents_path.display(), %tag_name, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let res = App::new(documents_path, tag_name, fallback.max_matches)
        .and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Right | KeyCode::Char('n') => app.step_tag(true),
                KeyCode::Left | KeyCode::Char('p') => app.step_tag(false),
                KeyCode::Enter | KeyCode::Char(' ') => app.show_element(),
                KeyCode::Char('o') => app.show_payload(TagChangeIntent::OpenTag),
                KeyCode::Char('c') => app.show_payload(TagChangeIntent::CloseTag),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| {
            let name = path
                .strip_prefix(&app.documents_path)
                .unwrap_or(path)
                .display()
                .to_string();
            ListItem::new(vec![Line::from(vec![Span::raw(name)])])
        })
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Content panel, two rows lost to the border
    let height = usize::from(chunks[1].height.saturating_sub(2));
    let content = Paragraph::new(app.render_document_content(height)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("<{}>", app.tag_name)),
    );

    f.render_widget(content, chunks[1]);

    // Status and instructions
    let help = Paragraph::new(vec![
        Line::from(app.status.clone()),
        Line::from(
            "q: Quit | j/k: File | n/p: Next/Prev tag | Enter: Element | o/c: Open/Close payload",
        ),
    ]);

    f.render_widget(help, rows[1]);
}
