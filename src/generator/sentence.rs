use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::generator::bundled_text;
use crate::generator::normalize::normalize_text;

pub const FALLBACK_SENTENCE: &str = "The quick brown fox jumps over the lazy dog";

#[cfg(feature = "network")]
const API_TIMEOUT: Duration = Duration::from_secs(2);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(2);
const COMMAND_POLL: Duration = Duration::from_millis(20);

/// Where sentence-mode text comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceSource {
    /// Sentences bundled with the binary.
    #[default]
    Local,
    /// A random non-empty line of a user file.
    File,
    /// Standard output of a shell command.
    Cmd,
    /// A quote service returning `{"text": ..., "author": ...}`.
    Api,
}

impl SentenceSource {
    pub fn to_key(self) -> &'static str {
        match self {
            SentenceSource::Local => "local",
            SentenceSource::File => "file",
            SentenceSource::Cmd => "cmd",
            SentenceSource::Api => "api",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "local" => Some(SentenceSource::Local),
            "file" => Some(SentenceSource::File),
            "cmd" => Some(SentenceSource::Cmd),
            "api" => Some(SentenceSource::Api),
            _ => None,
        }
    }
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn bundled_sentences() -> Vec<String> {
    let sentences = bundled_text("sentences.txt")
        .map(|t| non_empty_lines(&t))
        .unwrap_or_default();
    if sentences.is_empty() {
        vec![FALLBACK_SENTENCE.to_string()]
    } else {
        sentences
    }
}

/// Picks practice sentences from the configured source. Any failure of an
/// outside source is logged and answered from the bundled list instead, so
/// a drill never stalls on missing text.
pub struct SentenceGenerator {
    source: SentenceSource,
    sentences_file: Option<PathBuf>,
    command: Option<String>,
    api_url: Option<String>,
    local: Vec<String>,
}

impl SentenceGenerator {
    pub fn new(source: SentenceSource) -> Self {
        Self {
            source,
            sentences_file: None,
            command: None,
            api_url: None,
            local: bundled_sentences(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sentences_file = Some(path.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn source(&self) -> SentenceSource {
        self.source
    }

    /// Next sentence, already normalized to typable characters.
    pub fn next_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let external = match self.source {
            SentenceSource::Local => None,
            SentenceSource::File => self.from_file(rng),
            SentenceSource::Cmd => self.from_command(),
            // A configured file backs up the quote service before the
            // bundled list does.
            SentenceSource::Api => self.from_api().or_else(|| self.from_file(rng)),
        };

        let text = match external {
            Some(text) => text,
            None => self.local_sentence(rng),
        };
        normalize_text(&text)
    }

    fn local_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.local
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_SENTENCE.to_string())
    }

    fn from_file<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let path = self.sentences_file.as_deref()?;
        match random_line(path, rng) {
            Ok(Some(line)) => Some(line),
            Ok(None) => {
                warn!("{} has no sentences, using bundled list", path.display());
                None
            }
            Err(e) => {
                warn!("sentence file unavailable, using bundled list: {e:#}");
                None
            }
        }
    }

    fn from_command(&self) -> Option<String> {
        let command = self.command.as_deref().filter(|c| !c.trim().is_empty());
        let Some(command) = command else {
            warn!("sentence source is cmd but no command is configured");
            return None;
        };
        match run_command(command) {
            Ok(out) if !out.is_empty() => Some(out),
            Ok(_) => {
                warn!("`{command}` printed nothing, using bundled list");
                None
            }
            Err(e) => {
                warn!("sentence command failed, using bundled list: {e:#}");
                None
            }
        }
    }

    fn from_api(&self) -> Option<String> {
        let url = self.api_url.as_deref()?;
        match fetch_quote(url) {
            Ok(text) => {
                debug!("fetched quote from {url}");
                Some(text)
            }
            Err(e) => {
                warn!("quote service unavailable: {e:#}");
                None
            }
        }
    }
}

fn random_line<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> anyhow::Result<Option<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(non_empty_lines(&content).choose(rng).cloned())
}

/// Run `command` through `sh -c` and return its trimmed stdout. A command
/// still running after `COMMAND_TIMEOUT` is killed and reported as an error.
fn run_command(command: &str) -> anyhow::Result<String> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("spawning `{command}`"))?;

    // Drain stdout on its own thread so a chatty command cannot fill the
    // pipe and stall before it exits.
    let mut stdout = child.stdout.take().context("capturing stdout")?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).map(|_| buf)
    });

    let deadline = Instant::now() + COMMAND_TIMEOUT;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            bail!("`{command}` timed out after {}s", COMMAND_TIMEOUT.as_secs());
        }
        thread::sleep(COMMAND_POLL);
    };
    if !status.success() {
        bail!("`{command}` exited with {status}");
    }

    let out = reader
        .join()
        .map_err(|_| anyhow::anyhow!("stdout reader panicked"))??;
    Ok(String::from_utf8_lossy(&out).trim().to_string())
}

#[derive(Deserialize)]
struct Quote {
    #[serde(default)]
    text: String,
    #[serde(default)]
    author: Option<String>,
}

/// Quote body plus the author on its own line, when there is one.
fn quote_text(body: &str) -> anyhow::Result<String> {
    let quote: Quote = serde_json::from_str(body).context("parsing quote")?;
    let text = quote.text.trim();
    if text.is_empty() {
        bail!("quote has no text");
    }
    match quote.author.as_deref().map(str::trim) {
        Some(author) if !author.is_empty() => Ok(format!("{text}\n{author}")),
        _ => Ok(text.to_string()),
    }
}

#[cfg(feature = "network")]
fn fetch_quote(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(API_TIMEOUT)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    quote_text(&body)
}

#[cfg(not(feature = "network"))]
fn fetch_quote(url: &str) -> anyhow::Result<String> {
    bail!("built without network support, not fetching {url}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::io::Write;

    #[test]
    fn test_bundled_sentences_present() {
        let sentences = bundled_sentences();
        assert!(sentences.len() >= 10);
        assert!(sentences.iter().all(|s| !s.trim().is_empty()));
    }

    #[test]
    fn test_local_source_uses_bundled_list() {
        let generator = SentenceGenerator::new(SentenceSource::Local);
        let mut rng = SmallRng::seed_from_u64(2);
        let sentence = generator.next_sentence(&mut rng);
        assert!(bundled_sentences().contains(&sentence));
    }

    #[test]
    fn test_file_source_reads_non_empty_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n   \nOnly \u{201c}line\u{201d} here\n\n").unwrap();
        let generator = SentenceGenerator::new(SentenceSource::File).with_file(file.path());
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generator.next_sentence(&mut rng), "Only \"line\" here");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let generator =
            SentenceGenerator::new(SentenceSource::File).with_file("/nonexistent/keyrow.txt");
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(bundled_sentences().contains(&generator.next_sentence(&mut rng)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_source() {
        let generator =
            SentenceGenerator::new(SentenceSource::Cmd).with_command("echo '  from a command  '");
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generator.next_sentence(&mut rng), "from a command");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_falls_back() {
        let generator = SentenceGenerator::new(SentenceSource::Cmd).with_command("exit 3");
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(bundled_sentences().contains(&generator.next_sentence(&mut rng)));
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_command_times_out_to_bundled_list() {
        let generator =
            SentenceGenerator::new(SentenceSource::Cmd).with_command("sleep 5; echo late");
        let mut rng = SmallRng::seed_from_u64(0);
        let started = Instant::now();
        let sentence = generator.next_sentence(&mut rng);
        assert!(started.elapsed() < Duration::from_secs(3));
        assert_ne!(sentence, "late");
        assert!(bundled_sentences().contains(&sentence));
    }

    #[test]
    fn test_unconfigured_command_falls_back() {
        let generator = SentenceGenerator::new(SentenceSource::Cmd);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(bundled_sentences().contains(&generator.next_sentence(&mut rng)));
    }

    #[test]
    fn test_quote_text_with_and_without_author() {
        assert_eq!(
            quote_text(r#"{"text": "Be brief.", "author": "Anon"}"#).unwrap(),
            "Be brief.\nAnon"
        );
        assert_eq!(quote_text(r#"{"text": "Be brief."}"#).unwrap(), "Be brief.");
        assert!(quote_text(r#"{"author": "Anon"}"#).is_err());
        assert!(quote_text("not json").is_err());
    }

    #[test]
    fn test_source_keys_round_trip() {
        for source in [
            SentenceSource::Local,
            SentenceSource::File,
            SentenceSource::Cmd,
            SentenceSource::Api,
        ] {
            assert_eq!(SentenceSource::from_key(source.to_key()), Some(source));
        }
        assert_eq!(SentenceSource::from_key("ai"), None);
    }
}
