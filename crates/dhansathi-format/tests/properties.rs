use dhansathi_format::{sanitize, Rule, Sanitizer};
use proptest::prelude::*;

const PIECES: &[&str] = &[
    "a", "b", "Z", "Q", "7", "42", " ", "  ", "\n", "\n\n\n", "\t", ".", "!", "?", ". ", "1. ",
    "*", "**", "`", "#", "### ", "|", "-", "---", "•", "✅", "❌", "💡", "💰", "🙂", "बचत", ":",
];

fn noisy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..120).prop_map(|parts| parts.concat())
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Lowercase prose with single spaces and at most one blank line.
fn clean_text() -> impl Strategy<Value = String> {
    let sep = prop_oneof![Just(" "), Just("\n"), Just("\n\n")];
    (word(), prop::collection::vec((sep, word()), 0..24)).prop_map(|(first, rest)| {
        rest.into_iter().fold(first, |mut acc, (sep, w)| {
            acc.push_str(sep);
            acc.push_str(&w);
            acc
        })
    })
}

#[derive(Debug, Clone)]
enum Markup {
    Bold(String),
    Italic(String),
    Code(String),
    Heading(String),
    Table(String, String),
    Rule,
    Plain(String),
}

impl Markup {
    fn render(&self) -> String {
        match self {
            Markup::Bold(w) => format!("**{w}**"),
            Markup::Italic(w) => format!("*{w}*"),
            Markup::Code(w) => format!("`{w}`"),
            Markup::Heading(w) => format!("# {w}"),
            Markup::Table(a, b) => format!("\n| {a} | {b} |\n"),
            Markup::Rule => "---".to_owned(),
            Markup::Plain(w) => w.clone(),
        }
    }

    fn kept_word(&self) -> Option<&str> {
        match self {
            Markup::Bold(w)
            | Markup::Italic(w)
            | Markup::Code(w)
            | Markup::Heading(w)
            | Markup::Plain(w) => Some(w),
            Markup::Table(..) | Markup::Rule => None,
        }
    }
}

fn markup() -> impl Strategy<Value = Markup> {
    prop_oneof![
        word().prop_map(Markup::Bold),
        word().prop_map(Markup::Italic),
        word().prop_map(Markup::Code),
        word().prop_map(Markup::Heading),
        (word(), word()).prop_map(|(a, b)| Markup::Table(a, b)),
        Just(Markup::Rule),
        word().prop_map(Markup::Plain),
    ]
}

proptest! {
    #[test]
    fn clean_text_is_stable_up_to_trim(text in clean_text(), pad in "[ \n]{0,3}") {
        let padded = format!("{pad}{text}{pad}");
        prop_assert_eq!(Sanitizer::new().sanitize(&padded), text);
    }

    #[test]
    fn markup_never_survives(parts in prop::collection::vec(markup(), 1..16)) {
        let raw = parts.iter().map(Markup::render).collect::<Vec<_>>().join(" ");
        let out = Sanitizer::new().sanitize(&raw);
        for marker in ["*", "`", "#", "|", "---"] {
            prop_assert!(!out.contains(marker), "{marker:?} survived in {out:?}");
        }
        for part in &parts {
            if let Some(w) = part.kept_word() {
                prop_assert!(out.contains(w), "{w:?} lost from {out:?}");
            }
        }
    }

    #[test]
    fn whitespace_stays_bounded(raw in noisy_text()) {
        let out = Sanitizer::new().sanitize(&raw);
        prop_assert!(!out.contains("\n\n\n"), "newline run in {out:?}");
        prop_assert!(!out.contains("  "), "space run in {out:?}");
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn whitespace_stays_bounded_without_sentence_breaks(raw in noisy_text()) {
        let out = Sanitizer::new().without(Rule::SentenceBreaks).sanitize(&raw);
        prop_assert!(!out.contains("\n\n\n"));
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn bullet_items_keep_their_text(items in prop::collection::vec(word(), 1..8), bullet in prop_oneof![Just("-"), Just("•")]) {
        let raw = items.iter().fold(String::from("Intro"), |mut acc, item| {
            acc.push_str(&format!("\n{bullet} {item}"));
            acc
        });
        let out = Sanitizer::new().sanitize(&raw);
        let lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(lines.len(), items.len() + 1);
        for (line, item) in lines[1..].iter().zip(&items) {
            prop_assert_eq!(*line, item.as_str());
        }
    }

    #[test]
    fn numbered_points_open_paragraphs(items in prop::collection::vec(word(), 1..6)) {
        let raw = items
            .iter()
            .enumerate()
            .fold(String::from("Steps:"), |acc, (i, item)| format!("{acc} {}. {item}", i + 1));
        let out = Sanitizer::new().sanitize(&raw);
        for i in 1..=items.len() {
            let marker = format!("\n\n{i}. ");
            prop_assert!(out.contains(&marker), "missing {marker:?} in {out:?}");
        }
    }

    #[test]
    fn rule_steps_match_the_fold(raw in noisy_text()) {
        let stepped = Rule::ALL
            .iter()
            .fold(raw.clone(), |text, rule| rule.apply(&text).into_owned());
        prop_assert_eq!(Sanitizer::new().sanitize(&raw), stepped);
    }
}

#[test]
fn absent_and_empty_pass_through() {
    assert_eq!(sanitize(None), None);
    assert_eq!(sanitize(Some("")).as_deref(), Some(""));
}

#[test]
fn section_emoji_rule_only_fires_for_allow_list() {
    assert_eq!(sanitize(Some("Done. 💡 Next tip")).as_deref(), Some("Done.\n\n💡 Next tip"));
    assert_eq!(sanitize(Some("Done. 🙂 ok")).as_deref(), Some("Done. 🙂 ok"));
}
