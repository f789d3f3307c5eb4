//! Plausible random values for test data.

use rand::{seq::IndexedRandom, Rng};

const BOOK_TITLES: &[&str] = &[
    "The Far-Distant Oxus",
    "A Time to Kill",
    "Look to Windward",
    "The Mirror Crack'd from Side to Side",
    "Number the Stars",
    "The Wings of the Dove",
    "Precious Bane",
    "Those Barren Leaves, Thrones, Dominations",
    "Cover Her Face",
    "The Needle's Eye",
    "A Glass of Blessings",
    "Shall not Perish",
    "The Golden Bowl",
    "East of Eden",
    "Vanity Fair",
    "Tiger! Tiger!",
    "Things Fall Apart",
    "The Moving Finger",
    "Blithe Spirit",
    "In a Glass Darkly",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Boris", "Chiara", "Desmond", "Elif", "Farah", "Gustav", "Hana", "Ivo", "Jorunn",
    "Kofi", "Lucia", "Mateo", "Nadia", "Oskar", "Priya", "Quentin", "Rosa", "Soren", "Tomasz",
];

const LAST_NAMES: &[&str] = &[
    "Abernathy", "Bergstrom", "Castellano", "Dubois", "Eriksen", "Fitzgerald", "Gallagher",
    "Haddad", "Ishikawa", "Jankowski", "Kowalczyk", "Lindqvist", "Moreau", "Novak", "Okafor",
    "Petrov", "Quinlan", "Rossi", "Sandoval", "Takahashi",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

fn pick(list: &[&'static str]) -> &'static str {
    list.choose(&mut rand::rng()).copied().unwrap_or_default()
}

/// Uniform in `[min, max)`. Returns `min` for an empty range.
pub fn number_between(min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rand::rng().random_range(min..max)
}

/// Uniform in `[min, max]`.
pub fn number_in(min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rand::rng().random_range(min..=max)
}

pub fn book_title() -> String {
    pick(BOOK_TITLES).to_owned()
}

pub fn first_name() -> String {
    pick(FIRST_NAMES).to_owned()
}

pub fn last_name() -> String {
    pick(LAST_NAMES).to_owned()
}

/// Four to ten lorem words, capitalized, ending in a full stop.
pub fn sentence() -> String {
    let mut rng = rand::rng();
    let count = rng.random_range(4..=10);
    let words = (0..count).map(|_| pick(LOREM)).collect::<Vec<_>>().join(" ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Three to six sentences.
pub fn paragraph() -> String {
    let count = rand::rng().random_range(3..=6);
    (0..count).map(|_| sentence()).collect::<Vec<_>>().join(" ")
}
