use csv2hatchbuck::error::NameError;
use csv2hatchbuck::name::{PARTICLES, split_name};
use proptest::prelude::*;

fn split(full: &str) -> (String, String) {
    split_name(full).expect("splittable name")
}

#[test]
fn two_words_are_first_and_last() {
    assert_eq!(split("Ana Gomez"), ("Ana".into(), "Gomez".into()));
    assert_eq!(split("  Ana   Gomez \t"), ("Ana".into(), "Gomez".into()));
}

#[test]
fn particle_joins_the_last_name() {
    assert_eq!(
        split("Jean Marc de Fleurier"),
        ("Jean Marc".into(), "de Fleurier".into())
    );
    assert_eq!(
        split("Ludwig VAN Beethoven"),
        ("Ludwig".into(), "VAN Beethoven".into())
    );
    assert_eq!(
        split("Karl Theodor zu Guttenberg"),
        ("Karl Theodor".into(), "zu Guttenberg".into())
    );
}

#[test]
fn without_particle_only_last_word_is_last_name() {
    assert_eq!(
        split("Mary Jane Watson"),
        ("Mary Jane".into(), "Watson".into())
    );
}

#[test]
fn only_plain_spaces_separate_words() {
    assert_eq!(
        split("Jean\u{a0}Marc Dupont"),
        ("Jean\u{a0}Marc".into(), "Dupont".into())
    );
    assert!(split_name("Jean\u{a0}Marc").is_err());
}

#[test]
fn single_word_cannot_be_split() {
    assert_eq!(
        split_name("Cher"),
        Err(NameError::TooFewTokens("Cher".into()))
    );
    assert!(split_name("").is_err());
    assert!(split_name("    ").is_err());
}

proptest! {
    #[test]
    fn split_keeps_every_token_in_order(
        words in prop::collection::vec("[A-Za-z]{1,8}", 2..6),
        particle in prop::option::of(prop::sample::select(PARTICLES.to_vec())),
    ) {
        let mut tokens = words.clone();
        if let Some(particle) = particle {
            let at = tokens.len() - 1;
            tokens.insert(at, particle.to_uppercase());
        }
        let full = tokens.join(" ");
        let (first, last) = split_name(&full).expect("at least two tokens");
        prop_assert!(!first.is_empty());
        prop_assert!(!last.is_empty());
        prop_assert_eq!(format!("{first} {last}"), full);
    }

    #[test]
    fn single_tokens_always_fail(word in "[A-Za-z]{1,12}") {
        prop_assert!(split_name(&word).is_err());
    }
}
