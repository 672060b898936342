mod render;
mod report;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use cxw_config::Config;
use cxw_engine::{Crossword, Highlight, io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use report::{PuzzleSource, check_puzzles};
use std::{env, io::stdout, path::PathBuf, process};

const USAGE: &str = "Usage: cxw-cli [--check] [puzzle-file-or-folder]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    check: bool,
    path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--check" => parsed.check = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
            _ if parsed.path.is_none() => parsed.path = Some(PathBuf::from(arg)),
            _ => return Err(format!("Unexpected argument: {arg}")),
        }
    }
    Ok(parsed)
}

/// The puzzle shown in the content panel.
enum Selected {
    Puzzle(Box<Crossword>),
    Failed(String),
}

struct App {
    source: PuzzleSource,
    show_warnings: bool,
    file_list_state: ListState,
    selected: Option<Selected>,
    highlight: Highlight,
}

impl App {
    fn new(source: PuzzleSource, show_warnings: bool) -> Self {
        let mut app = Self {
            source,
            show_warnings,
            file_list_state: ListState::default(),
            selected: None,
            highlight: Highlight::new(),
        };

        if !app.source.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selection();
        }

        app
    }

    fn next_file(&mut self) {
        if self.source.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.source.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selection();
    }

    fn previous_file(&mut self) {
        if self.source.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.source.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.load_selection();
    }

    fn load_selection(&mut self) {
        self.highlight.clear();
        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|index| self.source.files.get(index))
        else {
            self.selected = None;
            return;
        };

        let loaded = io::read_puzzle(file.relative_path(), &self.source.root)
            .map_err(|e| e.to_string())
            .and_then(|mut crossword| {
                crossword.check().map_err(|e| e.to_string())?;
                Ok(crossword)
            });
        self.selected = Some(match loaded {
            Ok(crossword) => Selected::Puzzle(Box::new(crossword)),
            Err(message) => {
                log::error!("{message}");
                Selected::Failed(message)
            }
        });
    }

    /// Highlight the next clue in stored order, clearing after the last.
    fn cycle_clue(&mut self) {
        let Some(Selected::Puzzle(crossword)) = &self.selected else {
            return;
        };
        let clues = crossword.clues();
        let next = match self.highlight.current() {
            None => clues.first(),
            Some(current) => clues
                .iter()
                .position(|c| c.id == current)
                .and_then(|i| clues.get(i + 1)),
        };
        self.highlight.clear();
        if let Some(clue) = next {
            self.highlight.toggle_clue(&clue.id);
        }
    }

    fn content_lines(&self) -> Vec<Line<'static>> {
        match &self.selected {
            None => vec![Line::from("Select a puzzle to view it")],
            Some(Selected::Failed(message)) => vec![Line::from(format!("Error: {message}"))],
            Some(Selected::Puzzle(crossword)) => {
                render::render_crossword(crossword, &self.highlight, self.show_warnings)
            }
        }
    }
}

fn main() -> Result<()> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    // RUST_LOG overrides these defaults; the TUI owns the terminal so stays quiet
    let default_level = if args.check {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let show_warnings = config.as_ref().is_none_or(|c| c.show_warnings);

    let (path, from_config) = match (args.path, config) {
        (Some(path), _) => (path, false),
        (None, Some(config)) => (config.puzzles_path, true),
        (None, None) => {
            eprintln!("Error: No puzzle path provided and no config file found");
            eprintln!("{USAGE}");
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };

    let source = match PuzzleSource::open(&path) {
        Ok(source) => source,
        Err(e) => {
            let origin = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!("Error: Puzzle path '{}'{origin} is invalid: {e}", path.display());
            process::exit(1);
        }
    };

    if args.check {
        let report = check_puzzles(&source);
        for line in &report.lines {
            println!("{line}");
        }
        if !report.is_clean() {
            process::exit(1);
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, show_warnings);
    let res = run_app(&mut terminal, &mut app);

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

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Tab => app.cycle_clue(),
                KeyCode::Esc => app.highlight.clear(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // Puzzle list panel
    let file_items: Vec<ListItem> = app
        .source
        .files
        .iter()
        .map(|file| ListItem::new(Line::from(file.display_name().to_string())))
        .collect();
    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Puzzles"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Content panel
    let title = app
        .highlight
        .current()
        .map_or_else(|| "Puzzle".to_string(), |id| format!("Puzzle - {id}"));
    let content = Paragraph::new(app.content_lines())
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Tab: Next clue | Esc: Clear"),
    ]));
    f.render_widget(help, rows[1]);
}
