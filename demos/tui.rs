// Hacked up from
// https://github.com/fdehau/tui-rs/blob/v0.18.0/examples/user_input.rs

use algebra_cards::config::QuizConfig;
use algebra_cards::deck::load_deck;
use algebra_cards::session::{Report, Session};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use std::{error::Error, io};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use unicode_width::UnicodeWidthStr;

/// Practice algebra flashcards in the terminal.
#[derive(Parser, Debug)]
#[clap(long_about = None)]
struct Args {
    /// Yaml file with quiz settings.
    #[clap(short, long)]
    config: Option<String>,

    /// Practice this stored deck instead of a generated set.
    #[clap(short, long)]
    deck: Option<String>,

    /// Seed for reproducible sets.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Cards per set.
    #[clap(long)]
    count: Option<usize>,
}

#[derive(PartialEq)]
enum ApplicationState {
    Start,
    Cards,
    Results,
}

/// App holds the state of the application
struct App {
    state: ApplicationState,

    /// The practice set and its answers.
    session: Session,

    /// Current value of the input box, mirrors the answer of the current card.
    input: String,

    /// Graded results, set on submit.
    report: Report,
}

impl App {
    fn new(args: &Args) -> Result<App, Box<dyn Error>> {
        let mut config = match &args.config {
            Some(path) => QuizConfig::load(path)?,
            None => QuizConfig::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        if let Some(count) = args.count {
            config.batch_size = count;
        }
        config.validate()?;

        let mut session = Session::from_config(&config);
        let mut state = ApplicationState::Start;
        if let Some(path) = &args.deck {
            let deck = load_deck(path)?;
            session.load(deck.flashcards);
            if session.is_started() {
                state = ApplicationState::Cards;
            }
        }
        Ok(App {
            state,
            session,
            input: String::new(),
            report: Default::default(),
        })
    }

    fn sync_input(&mut self) {
        self.input = self.session.current_answer().unwrap_or("").to_owned();
    }

    fn store_input(&mut self) {
        // Only fails on an empty set, input is ignored then.
        let _ = self.session.answer_current(&self.input);
    }

    fn start(&mut self) {
        self.session.start();
        self.sync_input();
        self.state = ApplicationState::Cards;
    }

    fn next(&mut self) {
        self.session.next();
        self.sync_input();
    }

    fn previous(&mut self) {
        self.session.previous();
        self.sync_input();
    }

    fn submit(&mut self) {
        self.report = self.session.submit();
        self.state = ApplicationState::Results;
    }

    fn back_to_cards(&mut self) {
        self.session.back_to_cards();
        self.sync_input();
        self.state = ApplicationState::Cards;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    // create app and run it
    let app = App::new(&args)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Now run the application.
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Esc {
                return Ok(());
            }
            match app.state {
                ApplicationState::Start => {
                    if key.code == KeyCode::Enter {
                        app.start();
                    }
                }
                ApplicationState::Cards => match key.code {
                    KeyCode::Enter => app.submit(),
                    KeyCode::Tab | KeyCode::Right | KeyCode::Down => app.next(),
                    KeyCode::BackTab | KeyCode::Left | KeyCode::Up => app.previous(),
                    KeyCode::Char(c) => {
                        app.input.push(c);
                        app.store_input();
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                        app.store_input();
                    }
                    _ => {}
                },
                ApplicationState::Results => match key.code {
                    KeyCode::Char('r') => app.start(),
                    KeyCode::Char('b') => app.back_to_cards(),
                    _ => {}
                },
            }
        }
    }
}

fn help<B: Backend>(f: &mut Frame<B>, area: tui::layout::Rect, keys: &[(&str, &str)]) {
    let mut msg = vec![Span::raw("Press ")];
    for (i, (key, action)) in keys.iter().enumerate() {
        if i != 0 {
            msg.push(Span::raw(", "));
        }
        msg.push(Span::styled(
            key.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        msg.push(Span::raw(format!(" {action}")));
    }
    msg.push(Span::raw("."));
    let help_message = Paragraph::new(Text::from(Spans::from(msg)));
    f.render_widget(help_message, area);
}

fn ui<B: Backend>(f: &mut Frame<B>, app: &App) {
    match app.state {
        ApplicationState::Start => ui_start(f),
        ApplicationState::Cards => ui_cards(f, app),
        ApplicationState::Results => ui_results(f, app),
    }
}

fn ui_start<B: Backend>(f: &mut Frame<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Percentage(40),
                Constraint::Length(1),
                Constraint::Percentage(40),
            ]
            .as_ref(),
        )
        .split(f.size());
    help(f, chunks[0], &[("Esc", "to exit"), ("Enter", "to start practice")]);
    let title = Paragraph::new("Algebra Flashcards")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[2]);
}

fn ui_cards<B: Backend>(f: &mut Frame<B>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Percentage(25),
                Constraint::Length(1), // progress
                Constraint::Percentage(5),
                Constraint::Length(3), // card
                Constraint::Percentage(5),
                Constraint::Length(3), // input
                Constraint::Percentage(25),
            ]
            .as_ref(),
        )
        .split(f.size());

    const PROGRESS: usize = 2;
    const CARD: usize = 4;
    const INPUT: usize = 6;

    help(
        f,
        chunks[0],
        &[
            ("Esc", "to exit"),
            ("Tab", "for the next card"),
            ("Shift+Tab", "for the previous card"),
            ("Enter", "to submit"),
        ],
    );

    let progress = Paragraph::new(format!(
        "Question {} / {}",
        app.session.current_index() + 1,
        app.session.flashcards().len()
    ))
    .alignment(Alignment::Center);
    f.render_widget(progress, chunks[PROGRESS]);

    let expr = app.session.current_card().map(|c| c.expr()).unwrap_or("");
    let card = Paragraph::new(expr)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(card, chunks[CARD]);

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Your answer"));
    f.render_widget(input, chunks[INPUT]);
    f.set_cursor(
        chunks[INPUT].x + app.input.width() as u16 + 1,
        chunks[INPUT].y + 1,
    );
}

fn ui_results<B: Backend>(f: &mut Frame<B>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(2), // score
                Constraint::Min(3),    // answer key
            ]
            .as_ref(),
        )
        .split(f.size());

    help(
        f,
        chunks[0],
        &[
            ("Esc", "to exit"),
            ("r", "to try another set"),
            ("b", "to go back to the cards"),
        ],
    );

    let score = Paragraph::new(app.report.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(score, chunks[1]);

    let lines = app
        .report
        .entries
        .iter()
        .map(|entry| {
            let color = if entry.correct { Color::Green } else { Color::Red };
            Spans::from(Span::styled(entry.to_string(), Style::default().fg(color)))
        })
        .collect::<Vec<Spans>>();
    let key = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Answer key"));
    f.render_widget(key, chunks[2]);
}
