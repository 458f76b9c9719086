//! Static word bank for the syllable garden: lesson levels, their words,
//! and the canonical syllable breakdown the learner has to reproduce.

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Language {
    Portuguese,
}

impl Language {
    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
        }
    }

    /// BCP-47 tag handed to SpeechSynthesisUtterance.lang.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt-BR",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Portuguese => write!(f, "Portuguese"),
        }
    }
}

/// One target word: uppercase display text, its pictograph, and the ordered
/// syllables that concatenate back to the text.
#[derive(Copy, Clone, Debug, serde::Serialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Word {
    pub text: &'static str,
    pub emoji: &'static str,
    pub syllables: &'static [&'static str],
}

impl Word {
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    /// The form handed to speech synthesis. Utterances are lowercased so the
    /// voice reads the word instead of spelling out what it takes for an
    /// acronym.
    pub fn spoken_form(&self) -> String {
        self.text.to_lowercase()
    }
}

#[derive(Copy, Clone, Debug, serde::Serialize, Eq, PartialEq)]
pub struct LessonLevel {
    pub id: &'static str,
    pub title: &'static str,
    pub words: &'static [Word],
}

impl LessonLevel {
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            id: self.id.to_string(),
            title: self.title.to_string(),
            word_count: self.words.len(),
        }
    }
}

/// Owned projection of a level for the JS shell (level picker, map header).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub id: String,
    pub title: String,
    pub word_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    #[error("curriculum has no levels")]
    NoLevels,
    #[error("duplicate level id {0:?}")]
    DuplicateLevelId(&'static str),
    #[error("level {0:?} has no words")]
    EmptyLevel(&'static str),
    #[error("word {word:?} does not match its syllables (they join to {joined:?})")]
    SyllableMismatch {
        word: &'static str,
        joined: String,
    },
    #[error("word {0:?} has no pictograph")]
    MissingPictograph(&'static str),
}

/// Check catalog integrity. Run once at startup; the curriculum is const
/// data, so a failure here is a content bug, not a runtime condition.
pub fn validate(levels: &[LessonLevel]) -> Result<(), CurriculumError> {
    if levels.is_empty() {
        return Err(CurriculumError::NoLevels);
    }
    for (index, level) in levels.iter().enumerate() {
        if levels[..index].iter().any(|earlier| earlier.id == level.id) {
            return Err(CurriculumError::DuplicateLevelId(level.id));
        }
        if level.words.is_empty() {
            return Err(CurriculumError::EmptyLevel(level.id));
        }
        for word in level.words {
            let joined = word.syllables.concat();
            if joined != word.text {
                return Err(CurriculumError::SyllableMismatch {
                    word: word.text,
                    joined,
                });
            }
            if word.emoji.is_empty() {
                return Err(CurriculumError::MissingPictograph(word.text));
            }
        }
    }
    Ok(())
}

/// The shipped curriculum, ordered by syllable-complexity tier. Map nodes
/// cycle over these levels, so the list stays short on purpose.
pub const CURRICULUM: &[LessonLevel] = &[
    LessonLevel {
        id: "sementes",
        title: "Sementinhas",
        words: &[
            Word { text: "BOLA", emoji: "⚽", syllables: &["BO", "LA"] },
            Word { text: "CASA", emoji: "🏠", syllables: &["CA", "SA"] },
            Word { text: "GATO", emoji: "🐱", syllables: &["GA", "TO"] },
            Word { text: "PATO", emoji: "🦆", syllables: &["PA", "TO"] },
            Word { text: "FADA", emoji: "🧚", syllables: &["FA", "DA"] },
            Word { text: "MALA", emoji: "🧳", syllables: &["MA", "LA"] },
            Word { text: "SAPO", emoji: "🐸", syllables: &["SA", "PO"] },
            Word { text: "VACA", emoji: "🐮", syllables: &["VA", "CA"] },
            Word { text: "DADO", emoji: "🎲", syllables: &["DA", "DO"] },
            Word { text: "PIPA", emoji: "🪁", syllables: &["PI", "PA"] },
        ],
    },
    LessonLevel {
        id: "brotos",
        title: "Brotinhos",
        words: &[
            Word { text: "BANANA", emoji: "🍌", syllables: &["BA", "NA", "NA"] },
            Word { text: "SAPATO", emoji: "👟", syllables: &["SA", "PA", "TO"] },
            Word { text: "CAVALO", emoji: "🐴", syllables: &["CA", "VA", "LO"] },
            Word { text: "BONECA", emoji: "🪆", syllables: &["BO", "NE", "CA"] },
            Word { text: "MACACO", emoji: "🐵", syllables: &["MA", "CA", "CO"] },
            Word { text: "JANELA", emoji: "🪟", syllables: &["JA", "NE", "LA"] },
            Word { text: "PANELA", emoji: "🍲", syllables: &["PA", "NE", "LA"] },
            Word { text: "TOMATE", emoji: "🍅", syllables: &["TO", "MA", "TE"] },
            Word { text: "GIRAFA", emoji: "🦒", syllables: &["GI", "RA", "FA"] },
            Word { text: "PETECA", emoji: "🏸", syllables: &["PE", "TE", "CA"] },
        ],
    },
    LessonLevel {
        id: "flores",
        title: "Flores e Frutos",
        words: &[
            Word { text: "BORBOLETA", emoji: "🦋", syllables: &["BOR", "BO", "LE", "TA"] },
            Word { text: "CHOCOLATE", emoji: "🍫", syllables: &["CHO", "CO", "LA", "TE"] },
            Word { text: "ELEFANTE", emoji: "🐘", syllables: &["E", "LE", "FAN", "TE"] },
            Word { text: "BICICLETA", emoji: "🚲", syllables: &["BI", "CI", "CLE", "TA"] },
            Word { text: "TARTARUGA", emoji: "🐢", syllables: &["TAR", "TA", "RU", "GA"] },
            Word { text: "MORANGO", emoji: "🍓", syllables: &["MO", "RAN", "GO"] },
            Word { text: "PIPOCA", emoji: "🍿", syllables: &["PI", "PO", "CA"] },
            Word { text: "ESTRELA", emoji: "⭐", syllables: &["ES", "TRE", "LA"] },
            Word { text: "FLORESTA", emoji: "🌳", syllables: &["FLO", "RES", "TA"] },
            Word { text: "PRESENTE", emoji: "🎁", syllables: &["PRE", "SEN", "TE"] },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_curriculum_is_valid() {
        validate(CURRICULUM).unwrap();
    }

    #[test]
    fn every_word_rebuilds_from_its_syllables() {
        for level in CURRICULUM {
            for word in level.words {
                assert_eq!(word.syllables.concat(), word.text, "in level {}", level.id);
            }
        }
    }

    #[test]
    fn validate_rejects_bad_catalogs() {
        assert!(matches!(validate(&[]), Err(CurriculumError::NoLevels)));

        let empty = [LessonLevel { id: "empty", title: "Empty", words: &[] }];
        assert!(matches!(
            validate(&empty),
            Err(CurriculumError::EmptyLevel("empty"))
        ));

        let mismatched = [LessonLevel {
            id: "bad",
            title: "Bad",
            words: &[Word { text: "BOLA", emoji: "⚽", syllables: &["BO", "LO"] }],
        }];
        assert!(matches!(
            validate(&mismatched),
            Err(CurriculumError::SyllableMismatch { word: "BOLA", .. })
        ));

        let duplicated = [
            LessonLevel {
                id: "dup",
                title: "One",
                words: &[Word { text: "PIPA", emoji: "🪁", syllables: &["PI", "PA"] }],
            },
            LessonLevel {
                id: "dup",
                title: "Two",
                words: &[Word { text: "DADO", emoji: "🎲", syllables: &["DA", "DO"] }],
            },
        ];
        assert!(matches!(
            validate(&duplicated),
            Err(CurriculumError::DuplicateLevelId("dup"))
        ));
    }

    #[test]
    fn spoken_form_is_lowercased() {
        let word = Word { text: "BANANA", emoji: "🍌", syllables: &["BA", "NA", "NA"] };
        assert_eq!(word.spoken_form(), "banana");
    }

    #[test]
    fn level_summary_serializes_camel_case() {
        let summary = CURRICULUM[0].summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "sementes");
        assert_eq!(json["wordCount"], 10);
    }

    #[test]
    fn speech_tag_is_brazilian_portuguese() {
        assert_eq!(Language::Portuguese.speech_tag(), "pt-BR");
    }
}
