use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::engine::curriculum::{self, LessonSource};
use crate::error::Result;
use crate::generator::code_snippets::{self, CodeLanguage};
use crate::generator::render::{Chunk, render_chunk};
use crate::generator::sentence::{FALLBACK_SENTENCE, SentenceGenerator};
use crate::generator::generate;
use crate::keyboard::char_map::CharMap;
use crate::keyboard::layout::LayoutResolver;
use crate::keyboard::model::KeyboardModel;
use crate::keyboard::rows::row_layout;
use crate::session::chunk::ChunkState;
use crate::session::input::{self, Keystroke, KeystrokeEvent};
use crate::session::result::{DrillResult, DrillStats};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    #[default]
    Curriculum,
    Sentences,
    Code,
}

impl PracticeMode {
    pub fn to_key(self) -> &'static str {
        match self {
            PracticeMode::Curriculum => "curriculum",
            PracticeMode::Sentences => "sentences",
            PracticeMode::Code => "code",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "curriculum" => Some(PracticeMode::Curriculum),
            "sentences" => Some(PracticeMode::Sentences),
            "code" => Some(PracticeMode::Code),
            _ => None,
        }
    }

    /// Cycle order for a mode toggle.
    pub fn next(self) -> Self {
        match self {
            PracticeMode::Curriculum => PracticeMode::Sentences,
            PracticeMode::Sentences => PracticeMode::Code,
            PracticeMode::Code => PracticeMode::Curriculum,
        }
    }
}

/// The resolved knobs a drill runs with.
#[derive(Clone, Debug)]
pub struct DrillSettings {
    pub practice_mode: PracticeMode,
    pub strict: bool,
    pub duration: Duration,
    pub shuffle_after: usize,
    pub code_languages: Vec<CodeLanguage>,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl DrillSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            practice_mode: config.practice_mode(),
            strict: config.strict_mode,
            duration: Duration::from_secs(config.drill_duration_secs),
            shuffle_after: config.shuffle_after,
            code_languages: code_snippets::parse_languages(&config.code_languages),
        }
    }
}

/// Builds the sentence source a config describes.
pub fn sentence_generator(config: &Config) -> SentenceGenerator {
    let mut generator = SentenceGenerator::new(config.sentence_source());
    if !config.sentences_file.trim().is_empty() {
        generator = generator.with_file(config.sentences_file.trim());
    }
    if !config.sentence_command.trim().is_empty() {
        generator = generator.with_command(config.sentence_command.trim());
    }
    if !config.quote_api_url.trim().is_empty() {
        generator = generator.with_api_url(config.quote_api_url.trim());
    }
    generator
}

/// One timed drill: a stream of chunks typed back to back until the clock
/// runs out. Completing a chunk loads the next one and folds its counts
/// into the drill totals.
pub struct DrillSession {
    settings: DrillSettings,
    lesson_index: usize,
    resolver: Box<dyn LayoutResolver>,
    char_map: CharMap,
    sentences: SentenceGenerator,
    rng: SmallRng,

    chunk: ChunkState,
    chunk_language: Option<CodeLanguage>,
    active: bool,
    started_at: Option<Instant>,
    chunks_completed: usize,
    cumulative_chars: usize,
    cumulative_errors: usize,
}

impl DrillSession {
    pub fn new(
        settings: DrillSettings,
        lesson_index: usize,
        resolver: Box<dyn LayoutResolver>,
        sentences: SentenceGenerator,
        rng: SmallRng,
    ) -> Self {
        let char_map = CharMap::build(&*resolver);
        Self {
            settings,
            lesson_index: curriculum::clamp_index(lesson_index),
            resolver,
            char_map,
            sentences,
            rng,
            chunk: ChunkState::default(),
            chunk_language: None,
            active: false,
            started_at: None,
            chunks_completed: 0,
            cumulative_chars: 0,
            cumulative_errors: 0,
        }
    }

    /// Session for a resolved config, with the built-in layout it names.
    pub fn from_config(config: &Config, lesson_index: usize) -> Self {
        let model = KeyboardModel::from_name(&config.keyboard_layout);
        info!("drilling on the {} layout", model.name);
        Self::new(
            DrillSettings::from_config(config),
            lesson_index,
            Box::new(model),
            sentence_generator(config),
            SmallRng::from_entropy(),
        )
    }

    /// Reset the counters and load the first chunk. The clock starts on the
    /// first keystroke.
    pub fn start(&mut self) -> Result<()> {
        self.active = true;
        self.started_at = None;
        self.chunks_completed = 0;
        self.cumulative_chars = 0;
        self.cumulative_errors = 0;
        self.chunk = self.next_chunk()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn chunk(&self) -> &ChunkState {
        &self.chunk
    }

    pub fn chunk_language(&self) -> Option<CodeLanguage> {
        self.chunk_language
    }

    pub fn chunks_completed(&self) -> usize {
        self.chunks_completed
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn char_map(&self) -> &CharMap {
        &self.char_map
    }

    /// Feed one keystroke. Finishing the chunk loads the next one.
    pub fn handle(&mut self, keystroke: Keystroke) -> Result<Option<KeystrokeEvent>> {
        if !self.active {
            return Ok(None);
        }
        let event = match keystroke {
            Keystroke::Backspace => {
                input::process_backspace(&mut self.chunk);
                None
            }
            Keystroke::Char(ch) => {
                if self.started_at.is_none() {
                    self.started_at = Some(Instant::now());
                }
                input::process_char(&mut self.chunk, ch, &self.char_map, self.settings.strict)
            }
        };

        if self.chunk.is_complete() {
            self.load_next_chunk()?;
        }
        Ok(event)
    }

    fn load_next_chunk(&mut self) -> Result<()> {
        self.cumulative_chars += self.chunk.typed.len();
        self.cumulative_errors += self.chunk.errors;
        self.chunks_completed += 1;
        self.chunk = self.next_chunk()?;
        debug!("chunk {} loaded", self.chunks_completed + 1);
        Ok(())
    }

    fn next_chunk(&mut self) -> Result<ChunkState> {
        self.chunk_language = None;
        let chunk = match self.settings.practice_mode {
            PracticeMode::Curriculum => self.lesson_chunk()?,
            PracticeMode::Sentences => self.sentence_chunk(),
            PracticeMode::Code => self.code_chunk(),
        };

        if !chunk.is_empty() {
            return Ok(ChunkState::new(chunk));
        }
        warn!("generated an empty chunk, practicing a sentence instead");
        let chunk = self.sentence_chunk();
        if !chunk.is_empty() {
            return Ok(ChunkState::new(chunk));
        }
        warn!("sentence source gave no typable text, using the stock sentence");
        Ok(ChunkState::from_text(FALLBACK_SENTENCE, &self.char_map))
    }

    fn lesson_chunk(&mut self) -> Result<Chunk> {
        let lesson = curriculum::lesson(self.lesson_index)?;
        match lesson.source {
            LessonSource::Drill { algorithm, row } => {
                let row = row_layout(row)?;
                let shuffle = self.chunks_completed >= self.settings.shuffle_after;
                let seq = generate(
                    algorithm,
                    row,
                    algorithm.default_repetitions(),
                    shuffle,
                    &mut self.rng,
                );
                Ok(render_chunk(&seq, lesson.shift_mode, &*self.resolver, &mut self.rng))
            }
            LessonSource::Sentence => Ok(self.sentence_chunk()),
        }
    }

    fn sentence_chunk(&mut self) -> Chunk {
        let sentence = self.sentences.next_sentence(&mut self.rng);
        Chunk::from_text(&sentence, &self.char_map)
    }

    fn code_chunk(&mut self) -> Chunk {
        match code_snippets::random_snippet(&self.settings.code_languages, &mut self.rng) {
            Some((language, snippet)) => {
                self.chunk_language = Some(language);
                Chunk::from_text(&snippet, &self.char_map)
            }
            None => self.sentence_chunk(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|s| s.elapsed()).unwrap_or_default()
    }

    pub fn remaining(&self) -> Duration {
        self.settings.duration.saturating_sub(self.elapsed())
    }

    pub fn is_time_up(&self) -> bool {
        self.active && self.started_at.is_some() && self.remaining().is_zero()
    }

    /// Characters and errors so far, including the chunk in progress.
    pub fn totals(&self) -> (usize, usize) {
        (
            self.cumulative_chars + self.chunk.typed.len(),
            self.cumulative_errors + self.chunk.errors,
        )
    }

    pub fn live_stats(&self) -> DrillStats {
        let (chars, errors) = self.totals();
        DrillStats::live(chars, errors, self.elapsed().as_secs_f64())
    }

    /// Stop the drill and score it. Curriculum drills pass on meeting both
    /// lesson targets; free practice always passes.
    pub fn finish(&mut self) -> Result<DrillResult> {
        self.active = false;
        let (chars, errors) = self.totals();
        let stats = DrillStats::over_duration(chars, errors, self.settings.duration.as_secs());

        let (lesson_name, passed) = match self.settings.practice_mode {
            PracticeMode::Curriculum => {
                let lesson = curriculum::lesson(self.lesson_index)?;
                let passed = lesson.passes(stats.wpm, stats.accuracy);
                if passed {
                    info!("{} cleared at {} wpm, {}%", lesson.name, stats.wpm, stats.accuracy);
                } else {
                    info!(
                        "{} not cleared: {} wpm / {}% against {} wpm / {}%",
                        lesson.name, stats.wpm, stats.accuracy, lesson.target_wpm, lesson.target_acc
                    );
                }
                (Some(lesson.name.to_string()), passed)
            }
            PracticeMode::Sentences | PracticeMode::Code => (None, true),
        };

        Ok(DrillResult {
            practice_mode: self.settings.practice_mode,
            lesson_index: self.lesson_index,
            lesson_name,
            wpm: stats.wpm,
            accuracy: stats.accuracy,
            typed_chars: chars,
            errors,
            chunks_completed: self.chunks_completed,
            elapsed_secs: self.elapsed().as_secs_f64(),
            passed,
            timestamp: Utc::now(),
        })
    }
}
