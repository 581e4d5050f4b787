use crate::error::{QuizError, Result};
use crate::traits::Flashcard;
use serde::{Deserialize, Serialize};

/// Representation on disk of a generated set of cards.
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DeckStorage {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

enum Format {
    Yaml,
    Json,
}

fn format_of(filename: &str) -> Result<Format> {
    if filename.ends_with("yaml") || filename.ends_with("yml") {
        Ok(Format::Yaml)
    } else if filename.ends_with("json") {
        Ok(Format::Json)
    } else {
        Err(QuizError::UnsupportedFormat(format!(
            "{filename}, use .yaml or .json"
        )))
    }
}

pub fn load_deck(filename: &str) -> Result<DeckStorage> {
    let format = format_of(filename)?;
    let file = std::fs::File::open(filename)?;
    let deck: DeckStorage = match format {
        Format::Yaml => serde_yaml::from_reader(file)?,
        Format::Json => serde_json::from_reader(file)?,
    };
    log::debug!("loaded {} cards from {filename}", deck.flashcards.len());
    Ok(deck)
}

pub fn save_deck(filename: &str, name: &str, flashcards: &[Flashcard]) -> Result<()> {
    let format = format_of(filename)?;
    let storage = DeckStorage {
        name: name.to_owned(),
        flashcards: flashcards.to_vec(),
    };
    use std::fs::OpenOptions;
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(filename)?;
    match format {
        Format::Yaml => serde_yaml::to_writer(file, &storage)?,
        Format::Json => serde_json::to_writer_pretty(file, &storage)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MixedGenerator;
    use crate::traits::CardGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cards() -> Vec<Flashcard> {
        let mut rng = StdRng::seed_from_u64(30);
        (0..5).map(|_| MixedGenerator.generate(&mut rng)).collect()
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir();
        let flashcards = cards();
        for ext in ["yaml", "json"] {
            let path = dir.join(format!("algebra_cards_deck_test.{ext}"));
            let path = path.to_str().expect("temp dir is utf8");
            save_deck(path, "test deck", &flashcards).expect("should save");
            let deck = load_deck(path).expect("should load");
            assert_eq!(deck.name, "test deck");
            assert_eq!(deck.flashcards, flashcards);
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            save_deck("/tmp/deck.txt", "x", &cards()),
            Err(QuizError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            load_deck("/tmp/deck.csv"),
            Err(QuizError::UnsupportedFormat(_))
        ));
    }
}
