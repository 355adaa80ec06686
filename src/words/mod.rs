use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

pub const DEFAULT_BANK: &str = "party";

#[derive(Deserialize)]
struct BankFile {
    name: String,
    phrases: Vec<String>,
}

/// Ordered, fixed list of phrases shown on the cards.
///
/// A bank is never empty, so any index produced by [`WordBank::random_index`]
/// or [`WordBank::next_index`] is valid for [`WordBank::get`].
#[derive(Clone, Debug, PartialEq)]
pub struct WordBank {
    pub name: String,
    phrases: Vec<String>,
}

impl WordBank {
    /// Loads one of the banks compiled into the binary.
    pub fn builtin(name: &str) -> Result<Self> {
        let file = WORDS_DIR
            .get_file(format!("{}.json", name))
            .ok_or_else(|| Error::MissingBuiltin(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::MissingBuiltin(name.to_string()))?;

        let parsed: BankFile = serde_json::from_str(contents)?;
        Self::from_phrases(parsed.name, parsed.phrases)
            .ok_or_else(|| Error::MissingBuiltin(name.to_string()))
    }

    /// Loads a custom bank. `.json` files use the built-in schema, anything
    /// else is read as one phrase per line with `#` comments.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let (name, phrases) = if path.extension().is_some_and(|ext| ext == "json") {
            let parsed: BankFile = serde_json::from_str(&contents)?;
            (parsed.name, parsed.phrases)
        } else {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string());
            (name, parse_lines(&contents))
        };

        Self::from_phrases(name, phrases).ok_or_else(|| Error::EmptyWordBank(path.to_path_buf()))
    }

    /// Returns `None` when no usable phrase remains after trimming.
    pub fn from_phrases<S: Into<String>>(name: S, phrases: Vec<String>) -> Option<Self> {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            None
        } else {
            Some(Self {
                name: name.into(),
                phrases,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, idx: usize) -> &str {
        &self.phrases[idx % self.phrases.len()]
    }

    pub fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.phrases.len()
    }

    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.phrases.len())
    }
}

fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
