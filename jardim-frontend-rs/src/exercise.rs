//! Exercise construction: word sampling and the syllable option pool.

use curriculum_utils::{LessonLevel, Word};
use rand::Rng;
use rand::seq::SliceRandom;

/// Distractors per exercise position. The first two exercises of a lesson
/// have none, the middle ones two, the later ones three.
pub fn distractor_count(exercise_index: usize) -> usize {
    match exercise_index {
        0 | 1 => 0,
        2..=4 => 2,
        _ => 3,
    }
}

/// Draw `count` words uniformly with replacement. Duplicates across the
/// sequence are expected; an empty level yields an empty sequence.
pub(crate) fn sample_exercises<R: Rng>(
    level: &LessonLevel,
    count: usize,
    rng: &mut R,
) -> Vec<Word> {
    let pool = level.words;
    if pool.is_empty() {
        return Vec::new();
    }
    (0..count).map(|_| pool[rng.gen_range(0..pool.len())]).collect()
}

/// Build the shuffled option pool for one exercise: the word's own syllables
/// plus distractors drawn from the whole active set. A draw that would
/// duplicate a value already in the pool is skipped, so the pool never shows
/// the same syllable twice for different reasons.
pub(crate) fn build_option_pool<R: Rng>(
    word: Word,
    exercise_index: usize,
    active_exercises: &[Word],
    rng: &mut R,
) -> Vec<&'static str> {
    let mut options: Vec<&'static str> = word.syllables.to_vec();

    let wanted = distractor_count(exercise_index);
    if wanted > 0 {
        // Drawing from the flattened multiset keeps frequent syllables more
        // likely to show up as distractors, same as drawing one at a time.
        let mut candidates: Vec<&'static str> = active_exercises
            .iter()
            .flat_map(|exercise| exercise.syllables.iter().copied())
            .collect();
        candidates.shuffle(rng);

        let mut added = 0;
        for syllable in candidates {
            if added == wanted {
                break;
            }
            if options.contains(&syllable) {
                continue;
            }
            options.push(syllable);
            added += 1;
        }
        if added < wanted {
            log::debug!(
                "only {added} of {wanted} distractors available for {:?}",
                word.text
            );
        }
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BANANA: Word = Word { text: "BANANA", emoji: "🍌", syllables: &["BA", "NA", "NA"] };
    const SAPATO: Word = Word { text: "SAPATO", emoji: "👟", syllables: &["SA", "PA", "TO"] };
    const JANELA: Word = Word { text: "JANELA", emoji: "🪟", syllables: &["JA", "NE", "LA"] };
    const GIRAFA: Word = Word { text: "GIRAFA", emoji: "🦒", syllables: &["GI", "RA", "FA"] };
    const ACTIVE: [Word; 4] = [BANANA, SAPATO, JANELA, GIRAFA];

    #[test]
    fn difficulty_ramp() {
        assert_eq!(distractor_count(0), 0);
        assert_eq!(distractor_count(1), 0);
        assert_eq!(distractor_count(2), 2);
        assert_eq!(distractor_count(4), 2);
        assert_eq!(distractor_count(5), 3);
        assert_eq!(distractor_count(7), 3);
    }

    #[test]
    fn early_exercises_have_no_distractors() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for index in 0..2 {
            let pool = build_option_pool(BANANA, index, &ACTIVE, &mut rng);
            let mut sorted = pool.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec!["BA", "NA", "NA"]);
        }
    }

    #[test]
    fn option_pool_counts_and_uniqueness_of_distractors() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for (index, expected_extra) in [(2, 2), (5, 3)] {
                let pool = build_option_pool(SAPATO, index, &ACTIVE, &mut rng);
                assert_eq!(pool.len(), SAPATO.syllables.len() + expected_extra);

                // distractors never duplicate anything already in the pool
                let mut seen = std::collections::BTreeMap::new();
                for syllable in &pool {
                    *seen.entry(*syllable).or_insert(0usize) += 1;
                }
                for (syllable, count) in seen {
                    let in_word =
                        SAPATO.syllables.iter().filter(|s| ***s == *syllable).count();
                    if in_word > 0 {
                        assert_eq!(count, in_word, "{syllable} duplicated by a distractor");
                    } else {
                        assert_eq!(count, 1, "distractor {syllable} drawn twice");
                    }
                }

                // every distractor really comes from the active set
                let candidates: Vec<&str> = ACTIVE
                    .iter()
                    .flat_map(|word| word.syllables.iter().copied())
                    .collect();
                for syllable in &pool {
                    assert!(candidates.contains(syllable));
                }
            }
        }
    }

    #[test]
    fn pool_always_contains_the_word_itself() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let pool = build_option_pool(JANELA, 6, &ACTIVE, &mut rng);
        for syllable in JANELA.syllables {
            assert!(pool.contains(syllable));
        }
    }

    #[test]
    fn repeated_word_in_pool_keeps_duplicate_syllables() {
        // BANANA needs two NA options even though distractor draws skip
        // values that are already present.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = build_option_pool(BANANA, 5, &ACTIVE, &mut rng);
        assert_eq!(pool.iter().filter(|&&s| s == "NA").count(), 2);
    }

    #[test]
    fn sampling_with_replacement_fills_the_request() {
        static TINY: LessonLevel = LessonLevel {
            id: "tiny",
            title: "Tiny",
            words: &[BANANA, SAPATO],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drawn = sample_exercises(&TINY, 8, &mut rng);
        assert_eq!(drawn.len(), 8);
        assert!(drawn.iter().all(|w| w.text == "BANANA" || w.text == "SAPATO"));

        static EMPTY: LessonLevel = LessonLevel { id: "none", title: "None", words: &[] };
        assert!(sample_exercises(&EMPTY, 8, &mut rng).is_empty());
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        static LEVEL: LessonLevel = LessonLevel {
            id: "det",
            title: "Det",
            words: &[BANANA, SAPATO, JANELA, GIRAFA],
        };
        let first: Vec<&str> = sample_exercises(&LEVEL, 8, &mut ChaCha8Rng::seed_from_u64(42))
            .iter()
            .map(|w| w.text)
            .collect();
        let second: Vec<&str> = sample_exercises(&LEVEL, 8, &mut ChaCha8Rng::seed_from_u64(42))
            .iter()
            .map(|w| w.text)
            .collect();
        assert_eq!(first, second);
    }
}
