//! `chatfront init` command implementation.
//!
//! Scaffolds a dictionaries directory with the bundled `ja` and `en`
//! catalogs. Existing files are left as they are, so re-running is safe and
//! never clobbers local translations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::i18n::dictionary::{self, Dictionary, DictionaryError};
use crate::i18n::Locale;

/// Bundled catalogs, embedded at compile time.
const JA_JSON: &str = include_str!("../assets/dictionaries/ja.json");
const EN_JSON: &str = include_str!("../assets/dictionaries/en.json");

pub fn bundled_json(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => JA_JSON,
        Locale::En => EN_JSON,
    }
}

/// The bundled dictionary for `locale`, parsed.
pub fn bundled(locale: Locale) -> Result<Dictionary, DictionaryError> {
    let origin = PathBuf::from(format!("<bundled>/{}.json", locale.as_str()));
    dictionary::parse(bundled_json(locale), &origin)
}

/// What happened to one dictionary file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Kept,
}

/// Run the init command: create the directory and write missing catalogs.
pub fn run_init(dir: &Path) -> Result<Vec<(Locale, Outcome)>> {
    println!("[1/2] Creating directory...");
    create_dir_if_missing(dir)?;

    println!("[2/2] Writing dictionaries...");
    let mut outcomes = Vec::with_capacity(Locale::ALL.len());
    for locale in Locale::ALL {
        let path = dir.join(format!("{}.json", locale.as_str()));
        let outcome = write_if_missing(&path, bundled_json(locale))?;
        outcomes.push((locale, outcome));
    }

    println!();
    println!(
        "Setup complete! Run `chatfront serve --dictionaries {}` to start the gate.",
        dir.display()
    );
    Ok(outcomes)
}

fn create_dir_if_missing(path: &Path) -> Result<()> {
    if path.is_dir() {
        println!("  Already exists: {}", path.display());
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        println!("  Created: {}", path.display());
    }
    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<Outcome> {
    if path.exists() {
        println!("  Keeping: {}", path.display());
        return Ok(Outcome::Kept);
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write dictionary: {}", path.display()))?;
    println!("  Writing: {}", path.display());
    Ok(Outcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Dictionaries;

    #[test]
    fn bundled_catalogs_parse() {
        for locale in Locale::ALL {
            let dict = bundled(locale).expect("bundled dictionary parses");
            assert!(dict.get("signin.title").is_some(), "{locale}");
            assert!(dict.get("chat.threads").is_some(), "{locale}");
        }
    }

    #[test]
    fn bundled_catalogs_share_keys() {
        let ja: serde_json::Value = serde_json::from_str(JA_JSON).unwrap();
        let en: serde_json::Value = serde_json::from_str(EN_JSON).unwrap();
        for section in ["home", "chat", "prompts", "signin"] {
            let ja_keys: Vec<_> = ja[section].as_object().unwrap().keys().collect();
            let en_keys: Vec<_> = en[section].as_object().unwrap().keys().collect();
            assert_eq!(ja_keys, en_keys, "{section}");
        }
    }

    #[test]
    fn init_from_scratch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("dictionaries");

        let outcomes = run_init(&target).expect("init succeeds");
        assert_eq!(
            outcomes,
            vec![(Locale::Ja, Outcome::Written), (Locale::En, Outcome::Written)]
        );

        let dicts = Dictionaries::load_dir(&target).expect("load");
        assert_eq!(dicts.get(Locale::En).unwrap().text("signin.title"), "Sign in");
    }

    #[test]
    fn init_preserves_existing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let custom = r#"{"signin":{"title":"ようこそ、サインイン"}}"#;
        fs::write(dir.path().join("ja.json"), custom).expect("write");

        let outcomes = run_init(dir.path()).expect("init succeeds");
        assert_eq!(outcomes[0], (Locale::Ja, Outcome::Kept));
        assert_eq!(outcomes[1], (Locale::En, Outcome::Written));

        let content = fs::read_to_string(dir.path().join("ja.json")).expect("read");
        assert_eq!(content, custom);
    }

    #[test]
    fn init_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");

        run_init(dir.path()).expect("first init");
        let first = fs::read_to_string(dir.path().join("en.json")).expect("read");

        let outcomes = run_init(dir.path()).expect("second init");
        let second = fs::read_to_string(dir.path().join("en.json")).expect("read");

        assert_eq!(first, second);
        assert!(outcomes.iter().all(|(_, o)| *o == Outcome::Kept));
    }
}
