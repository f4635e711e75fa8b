use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use keyrow::config::Config;
use keyrow::engine::curriculum::{self, LESSONS, LessonSource};
use keyrow::error::KeyrowError;
use keyrow::event::{AppEvent, EventHandler};
use keyrow::generator::render::{ShiftMode, render};
use keyrow::generator::{Algorithm, generate};
use keyrow::keyboard::display::KeyLabels;
use keyrow::keyboard::finger::finger_for_key;
use keyrow::keyboard::key::KEYBOARD_ROWS;
use keyrow::keyboard::model::KeyboardModel;
use keyrow::keyboard::rows::{row_layout, row_names};
use keyrow::session::drill::{DrillSession, PracticeMode};
use keyrow::session::input;
use keyrow::session::result::DrillResult;
use keyrow::store::json_store::JsonStore;
use keyrow::store::profile::UserProfile;

const DEFAULT_PROFILE: &str = "default";

#[derive(Parser)]
#[command(name = "keyrow", version, about = "Row-by-row terminal typing tutor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the curriculum
    Lessons {
        #[arg(short, long, help = "Mark this profile's current lesson")]
        profile: Option<String>,
    },
    /// Print one generated chunk
    Preview(PreviewArgs),
    /// Print key labels and fingers for a layout
    Keyboard {
        #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak)")]
        layout: Option<String>,
    },
    /// Run an interactive drill
    Drill(DrillArgs),
}

#[derive(Args)]
struct PreviewArgs {
    #[arg(long, help = "Lesson number, e.g. 1.4")]
    lesson: Option<String>,
    #[arg(long, help = "Practice row, e.g. home or focus_e_i")]
    row: Option<String>,
    #[arg(long, help = "isolation, adjacency, alternating, mirror, rolls or synthesis")]
    algorithm: Option<String>,
    #[arg(long, help = "off, mixed or always")]
    shift: Option<String>,
    #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak)")]
    layout: Option<String>,
    #[arg(long, help = "Repetitions, or word count for synthesis")]
    repetitions: Option<usize>,
    #[arg(long, help = "Shuffle generated units")]
    shuffle: bool,
    #[arg(long, help = "Seed for reproducible output")]
    seed: Option<u64>,
}

#[derive(Args)]
struct DrillArgs {
    #[arg(short, long, help = "Profile name")]
    profile: Option<String>,
    #[arg(short, long, help = "curriculum, sentences or code")]
    mode: Option<String>,
    #[arg(long, help = "Start at this lesson number instead of the profile's")]
    lesson: Option<String>,
    #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak)")]
    layout: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Lessons { profile } => list_lessons(profile.as_deref()),
        Command::Preview(args) => preview(args),
        Command::Keyboard { layout } => print_keyboard(layout),
        Command::Drill(args) => drill(args),
    }
}

/// Core failures (an unknown row above all) are curriculum bugs; log them
/// before they unwind the command.
fn logged<T>(result: Result<T, KeyrowError>) -> Result<T> {
    Ok(result.inspect_err(|err| error!("{err}"))?)
}

fn lesson_index_for(number: &str) -> Result<usize> {
    curriculum::find_by_number(number).with_context(|| format!("no lesson numbered {number}"))
}

fn list_lessons(profile: Option<&str>) -> Result<()> {
    let current = match profile {
        Some(name) => JsonStore::new()?
            .load_profile(name)?
            .map(|p| p.current_lesson_index),
        None => None,
    };

    for (idx, lesson) in LESSONS.iter().enumerate() {
        let marker = if current == Some(idx) { '>' } else { ' ' };
        let source = match lesson.source {
            LessonSource::Drill { algorithm, row } => format!("{} on {row}", algorithm.to_key()),
            LessonSource::Sentence => "sentences".to_string(),
        };
        println!(
            "{marker} {:<36} {:<28} {:>3}% {:>3} wpm",
            lesson.name, source, lesson.target_acc, lesson.target_wpm
        );
    }
    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    let config = Config::load()?;
    let model = KeyboardModel::from_name(args.layout.as_deref().unwrap_or(&config.keyboard_layout));
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let (algorithm, row_name, mut shift) = match (&args.lesson, &args.row) {
        (Some(number), _) => {
            let lesson = curriculum::lesson(lesson_index_for(number)?)?;
            match lesson.source {
                LessonSource::Drill { algorithm, row } => (algorithm, row, lesson.shift_mode),
                LessonSource::Sentence => {
                    let sentences = keyrow::session::drill::sentence_generator(&config);
                    println!("{}", sentences.next_sentence(&mut rng));
                    return Ok(());
                }
            }
        }
        (None, Some(row)) => {
            let algorithm = match args.algorithm.as_deref() {
                Some(key) => Algorithm::from_key(key)
                    .with_context(|| format!("unknown algorithm {key:?}"))?,
                None => Algorithm::Isolation,
            };
            (algorithm, row.as_str(), ShiftMode::Off)
        }
        (None, None) => bail!(
            "pass --lesson or --row (rows: {})",
            row_names().collect::<Vec<_>>().join(", ")
        ),
    };
    if let Some(key) = args.shift.as_deref() {
        shift = ShiftMode::from_key(key).with_context(|| format!("unknown shift mode {key:?}"))?;
    }

    let row = logged(row_layout(row_name))?;
    let repetitions = args
        .repetitions
        .unwrap_or_else(|| algorithm.default_repetitions());
    let seq = generate(algorithm, row, repetitions, args.shuffle, &mut rng);
    println!("{}", render(&seq, shift, &model, &mut rng));
    Ok(())
}

fn print_keyboard(layout: Option<String>) -> Result<()> {
    let layout = match layout {
        Some(layout) => layout,
        None => Config::load()?.keyboard_layout,
    };
    let model = KeyboardModel::from_name(&layout);
    let labels = KeyLabels::build(&model);

    println!("{}", model.name);
    for row in KEYBOARD_ROWS {
        let caps: Vec<String> = row
            .iter()
            .map(|&key| format!("{}:{}", labels.get(key), finger_for_key(key).label()))
            .collect();
        println!("  {}", caps.join(" "));
    }
    Ok(())
}

fn drill(args: DrillArgs) -> Result<()> {
    let store = JsonStore::new()?;
    let profile_name = args.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
    let mut profile = store.load_or_create(profile_name)?;

    let mut config = profile.config(&Config::load()?);
    if let Some(mode) = args.mode {
        if PracticeMode::from_key(&mode).is_none() {
            bail!("unknown practice mode {mode:?}");
        }
        config.practice_mode = mode;
    }
    if let Some(layout) = args.layout {
        config.keyboard_layout = layout;
        config.normalize();
    }
    if let Some(number) = args.lesson.as_deref() {
        profile.current_lesson_index = lesson_index_for(number)?;
    }

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
    let events = EventHandler::new(Duration::from_millis(200));

    let outcome = run_drills(&config, &mut profile, &store, &events);

    let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
    disable_raw_mode()?;

    match outcome? {
        Some(result) => print_result(&result, &profile),
        None => println!("No drill completed."),
    }
    Ok(())
}

/// Drill until the typist declines another round. Returns the last result.
fn run_drills(
    config: &Config,
    profile: &mut UserProfile,
    store: &JsonStore,
    events: &EventHandler,
) -> Result<Option<DrillResult>> {
    let mut last = None;
    loop {
        let mut session = DrillSession::from_config(config, profile.current_lesson_index);
        logged(session.start())?;

        let Some(result) = run_session(&mut session, events)? else {
            return Ok(last);
        };
        profile.record_drill(&result);
        store.save_profile(profile)?;
        info!(
            "drill recorded for {}: {} wpm, {}%",
            profile.name, result.wpm, result.accuracy
        );

        draw_result(&result)?;
        let again = loop {
            match events.next()? {
                AppEvent::Key(key) => match key.code {
                    KeyCode::Char('r') => {
                        if profile.repeat_lesson(&result) {
                            store.save_profile(profile)?;
                        }
                        break true;
                    }
                    KeyCode::Enter | KeyCode::Char('n') => break true,
                    _ => break false,
                },
                AppEvent::Tick => {}
            }
        };
        last = Some(result);
        if !again {
            return Ok(last);
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

/// Run one drill to time-up or Esc. A drill quit before the first
/// keystroke yields no result.
fn run_session(session: &mut DrillSession, events: &EventHandler) -> Result<Option<DrillResult>> {
    loop {
        draw_session(session)?;
        match events.next()? {
            AppEvent::Key(key) if is_quit(&key) => {
                if session.elapsed().is_zero() {
                    return Ok(None);
                }
                return Ok(Some(logged(session.finish())?));
            }
            AppEvent::Key(key) => {
                if let Some(keystroke) = input::classify(&key) {
                    logged(session.handle(keystroke))?;
                }
            }
            AppEvent::Tick => {}
        }
        if session.is_time_up() {
            return Ok(Some(logged(session.finish())?));
        }
    }
}

fn visible(ch: char) -> char {
    match ch {
        '\n' | '\r' => '\u{21b5}',
        '\t' => '\u{2192}',
        other => other,
    }
}

fn draw_session(session: &DrillSession) -> Result<()> {
    let (width, _) = terminal::size().unwrap_or((80, 24));
    let width = usize::from(width).max(20);
    let chunk = session.chunk();
    let stats = session.live_stats();
    let remaining = session.remaining().as_secs();

    let heading = match session.settings().practice_mode {
        PracticeMode::Curriculum => curriculum::lesson(session.lesson_index())?.name.to_string(),
        PracticeMode::Sentences => "Sentences".to_string(),
        PracticeMode::Code => match session.chunk_language() {
            Some(language) => format!("Code ({})", language.to_key()),
            None => "Code".to_string(),
        },
    };

    let mut out = io::stdout();
    queue!(
        out,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!(
            "{heading}  {:02}:{:02}  {} wpm  {}%",
            remaining / 60,
            remaining % 60,
            stats.wpm,
            stats.accuracy
        )),
        cursor::MoveTo(0, 2),
    )?;

    // Keep the cursor a third of the way in so the upcoming text is visible.
    let cursor_pos = chunk.cursor();
    let start = cursor_pos.saturating_sub(width / 3);
    for (idx, &target) in chunk.target.iter().enumerate().skip(start).take(width) {
        let shown = visible(target);
        if idx < cursor_pos {
            let typed = chunk.typed[idx];
            if typed == target || (target == '\r' && typed == '\n') {
                queue!(out, PrintStyledContent(shown.green()))?;
            } else {
                queue!(out, PrintStyledContent(visible(typed).red()))?;
            }
        } else if idx == cursor_pos {
            queue!(out, PrintStyledContent(shown.reverse()))?;
        } else {
            queue!(out, PrintStyledContent(shown.dark_grey()))?;
        }
    }
    queue!(
        out,
        cursor::MoveTo(0, 4),
        Print("Esc finishes the drill"),
    )?;
    out.flush()?;
    Ok(())
}

fn draw_result(result: &DrillResult) -> Result<()> {
    let verdict = match (result.practice_mode, result.passed) {
        (PracticeMode::Curriculum, true) => "Lesson cleared.",
        (PracticeMode::Curriculum, false) => "Not there yet.",
        _ => "Drill done.",
    };
    let mut out = io::stdout();
    queue!(
        out,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!("{} wpm  {}%  {verdict}", result.wpm, result.accuracy)),
        cursor::MoveTo(0, 2),
        Print("Enter: next drill   r: repeat lesson   any other key: quit"),
    )?;
    out.flush()?;
    Ok(())
}

fn print_result(result: &DrillResult, profile: &UserProfile) {
    if let Some(name) = &result.lesson_name {
        println!("{name}");
    }
    println!(
        "{} wpm, {}% accuracy over {} chars ({} errors, {} chunks)",
        result.wpm, result.accuracy, result.typed_chars, result.errors, result.chunks_completed
    );
    println!(
        "{}: next lesson {}, best {} wpm, {} drills",
        profile.name,
        LESSONS[curriculum::clamp_index(profile.current_lesson_index)].name,
        profile.wpm_record,
        profile.total_drills
    );
}
