//! The individual rewrite steps of the reply pipeline.
//!
//! Every [`Rule`] is a pure `&str -> Cow<str>` substitution. Rules are
//! order-sensitive: later rules see the output of earlier ones, and
//! [`Rule::ALL`] is the one order in which they are meant to run.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Paragraph break inserted by the spacing rules.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Emoji that open a new section when they follow the end of a sentence.
pub const SECTION_EMOJI: [char; 10] = ['💡', '🎯', '💰', '🏦', '📱', '📊', '📈', '🔒', '💪', '🌟'];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

static BOLD: LazyLock<Regex> = LazyLock::new(|| compile(r"\*\*(.*?)\*\*"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| compile(r"\*(.*?)\*"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"`(.*?)`"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"#{1,6}[ \t]*"));
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| compile(r"\|.*\|"));
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"-{3,}"));
static ISOLATED_HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\n-{3,}\n"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[ \t]*[-•][ \t]*"));
static CHECK_MARK: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[ \t]*✅[ \t]*"));
static CROSS_MARK: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[ \t]*❌[ \t]*"));
static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\n{3,}"));
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r" {2,}"));
static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*([0-9]+\. )"));
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| compile(r"([.!?])\s*([A-Z])"));
static SENTENCE_THEN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"([.!?])\s*([0-9]+\.)"));
static SENTENCE_THEN_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    let class: String = SECTION_EMOJI.iter().collect();
    compile(&format!(r"([.!?])\s*([{class}])"))
});

/// One step of the reply pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `**X**` → `X`.
    StripBold,
    /// `*X*` → `X`.
    StripItalic,
    /// `` `X` `` → `X`.
    StripInlineCode,
    /// Drops runs of one to six `#` and the spaces after them.
    StripHeadings,
    /// Deletes everything from the first to the last `|` of a line.
    StripTableRows,
    /// Deletes runs of three or more hyphens.
    StripHorizontalRules,
    /// A hyphen run alone on its line becomes a paragraph break.
    StripIsolatedRules,
    /// `\n  - item` / `\n• item` → `\nitem`.
    StripBullets,
    /// Drops a ✅ that opens a line.
    StripCheckMarks,
    /// Drops a ❌ that opens a line.
    StripCrossMarks,
    /// Three or more newlines become one paragraph break.
    CollapseNewlines,
    /// Two or more spaces become one.
    CollapseSpaces,
    /// Every `N. ` marker starts a new paragraph.
    NumberedBreaks,
    /// `. X` → `.\n\nX` for any capital `X`.
    SentenceBreaks,
    /// Sentence end followed by a numbered marker starts a new paragraph.
    /// The period of a marker is not a sentence end.
    SentenceNumberBreaks,
    /// Sentence end followed by a section emoji starts a new paragraph,
    /// with the same marker exception.
    SectionEmojiBreaks,
    /// Re-collapses newline runs left behind by the break rules.
    RecollapseNewlines,
    /// Trims surrounding whitespace.
    Trim,
}

impl Rule {
    /// All rules, in pipeline order.
    pub const ALL: [Rule; 18] = [
        Rule::StripBold,
        Rule::StripItalic,
        Rule::StripInlineCode,
        Rule::StripHeadings,
        Rule::StripTableRows,
        Rule::StripHorizontalRules,
        Rule::StripIsolatedRules,
        Rule::StripBullets,
        Rule::StripCheckMarks,
        Rule::StripCrossMarks,
        Rule::CollapseNewlines,
        Rule::CollapseSpaces,
        Rule::NumberedBreaks,
        Rule::SentenceBreaks,
        Rule::SentenceNumberBreaks,
        Rule::SectionEmojiBreaks,
        Rule::RecollapseNewlines,
        Rule::Trim,
    ];

    /// Stable snake-case name, used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Rule::StripBold => "strip_bold",
            Rule::StripItalic => "strip_italic",
            Rule::StripInlineCode => "strip_inline_code",
            Rule::StripHeadings => "strip_headings",
            Rule::StripTableRows => "strip_table_rows",
            Rule::StripHorizontalRules => "strip_horizontal_rules",
            Rule::StripIsolatedRules => "strip_isolated_rules",
            Rule::StripBullets => "strip_bullets",
            Rule::StripCheckMarks => "strip_check_marks",
            Rule::StripCrossMarks => "strip_cross_marks",
            Rule::CollapseNewlines => "collapse_newlines",
            Rule::CollapseSpaces => "collapse_spaces",
            Rule::NumberedBreaks => "numbered_breaks",
            Rule::SentenceBreaks => "sentence_breaks",
            Rule::SentenceNumberBreaks => "sentence_number_breaks",
            Rule::SectionEmojiBreaks => "section_emoji_breaks",
            Rule::RecollapseNewlines => "recollapse_newlines",
            Rule::Trim => "trim",
        }
    }

    /// Looks a rule up by its [`name`](Rule::name).
    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Applies this single step.
    pub fn apply(self, text: &str) -> Cow<'_, str> {
        match self {
            Rule::StripBold => BOLD.replace_all(text, "$1"),
            Rule::StripItalic => ITALIC.replace_all(text, "$1"),
            Rule::StripInlineCode => INLINE_CODE.replace_all(text, "$1"),
            Rule::StripHeadings => HEADING.replace_all(text, ""),
            Rule::StripTableRows => TABLE_ROW.replace_all(text, ""),
            Rule::StripHorizontalRules => HYPHEN_RUN.replace_all(text, ""),
            Rule::StripIsolatedRules => ISOLATED_HYPHEN_RUN.replace_all(text, PARAGRAPH_BREAK),
            Rule::StripBullets => BULLET.replace_all(text, "\n"),
            Rule::StripCheckMarks => CHECK_MARK.replace_all(text, "\n"),
            Rule::StripCrossMarks => CROSS_MARK.replace_all(text, "\n"),
            Rule::CollapseNewlines | Rule::RecollapseNewlines => {
                NEWLINE_RUN.replace_all(text, PARAGRAPH_BREAK)
            }
            Rule::CollapseSpaces => SPACE_RUN.replace_all(text, " "),
            Rule::NumberedBreaks => NUMBERED_MARKER.replace_all(text, "\n\n$1"),
            Rule::SentenceBreaks => break_after_sentence(&SENTENCE_BREAK, text),
            Rule::SentenceNumberBreaks => break_after_sentence(&SENTENCE_THEN_NUMBER, text),
            Rule::SectionEmojiBreaks => break_after_sentence(&SENTENCE_THEN_EMOJI, text),
            Rule::Trim => Cow::Borrowed(text.trim()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Puts a paragraph break between the two groups of every match of `re`,
/// unless the first group is the period of a `N.` list marker.
fn break_after_sentence<'t>(re: &Regex, text: &'t str) -> Cow<'t, str> {
    re.replace_all(text, |caps: &Captures<'_>| {
        let start = caps.get(0).map_or(0, |m| m.start());
        if ends_numbered_marker(text, start) {
            caps[0].to_owned()
        } else {
            format!("{}{PARAGRAPH_BREAK}{}", &caps[1], &caps[2])
        }
    })
}

/// Whether the punctuation at `at` is the period of a `N.` list marker.
fn ends_numbered_marker(text: &str, at: usize) -> bool {
    text[at..].starts_with('.')
        && text[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(rule: Rule, input: &str) -> String {
        rule.apply(input).into_owned()
    }

    #[test]
    fn all_is_in_pipeline_order_and_names_round_trip() {
        assert_eq!(Rule::ALL.len(), 18);
        assert_eq!(Rule::ALL[0], Rule::StripBold);
        assert_eq!(Rule::ALL[13], Rule::SentenceBreaks);
        assert_eq!(Rule::ALL[17], Rule::Trim);
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(Rule::from_name("nope"), None);
    }

    #[test]
    fn bold_keeps_inner_text() {
        assert_eq!(run(Rule::StripBold, "a **big** win"), "a big win");
        assert_eq!(run(Rule::StripBold, "**one** and **two**"), "one and two");
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(run(Rule::StripBold, "**a\nb**"), "**a\nb**");
    }

    #[test]
    fn italic_keeps_inner_text() {
        assert_eq!(run(Rule::StripItalic, "save *now*"), "save now");
    }

    #[test]
    fn unterminated_italic_is_left_alone() {
        assert_eq!(run(Rule::StripItalic, "5 * 3"), "5 * 3");
    }

    #[test]
    fn inline_code_keeps_inner_text() {
        assert_eq!(run(Rule::StripInlineCode, "dial `*99#` now"), "dial *99# now");
    }

    #[test]
    fn headings_keep_text_and_line_end() {
        assert_eq!(run(Rule::StripHeadings, "## Savings\nbody"), "Savings\nbody");
        assert_eq!(run(Rule::StripHeadings, "###Tip"), "Tip");
    }

    #[test]
    fn headings_longer_than_six_are_fully_removed() {
        assert_eq!(run(Rule::StripHeadings, "######## Deep"), "Deep");
    }

    #[test]
    fn table_rows_are_deleted() {
        let input = "Plans:\n| Scheme | Rate |\n|---|---|\nEnd";
        assert_eq!(run(Rule::StripTableRows, input), "Plans:\n\n\nEnd");
    }

    #[test]
    fn single_pipe_survives() {
        assert_eq!(run(Rule::StripTableRows, "a | b"), "a | b");
    }

    #[test]
    fn hyphen_runs_are_deleted() {
        assert_eq!(run(Rule::StripHorizontalRules, "a\n---\nb"), "a\n\nb");
        assert_eq!(run(Rule::StripHorizontalRules, "co-op"), "co-op");
        assert_eq!(run(Rule::StripHorizontalRules, "x--y"), "x--y");
    }

    #[test]
    fn isolated_rule_becomes_paragraph_break() {
        assert_eq!(run(Rule::StripIsolatedRules, "a\n-----\nb"), "a\n\nb");
    }

    #[test]
    fn bullets_become_plain_lines() {
        assert_eq!(
            run(Rule::StripBullets, "Intro\n- Point A\n  • Point B"),
            "Intro\nPoint A\nPoint B"
        );
    }

    #[test]
    fn bullets_need_a_preceding_newline() {
        assert_eq!(run(Rule::StripBullets, "- first"), "- first");
    }

    #[test]
    fn bullets_keep_paragraph_breaks() {
        assert_eq!(run(Rule::StripBullets, "a\n\n- b"), "a\n\nb");
    }

    #[test]
    fn leading_status_marks_are_dropped() {
        assert_eq!(run(Rule::StripCheckMarks, "Do:\n ✅ Save"), "Do:\nSave");
        assert_eq!(run(Rule::StripCrossMarks, "Avoid:\n❌  Debt"), "Avoid:\nDebt");
        assert_eq!(run(Rule::StripCheckMarks, "done ✅"), "done ✅");
    }

    #[test]
    fn newline_runs_collapse_to_one_break() {
        assert_eq!(run(Rule::CollapseNewlines, "a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(run(Rule::CollapseNewlines, "a\n\nb"), "a\n\nb");
    }

    #[test]
    fn only_plain_spaces_collapse() {
        assert_eq!(run(Rule::CollapseSpaces, "a    b"), "a b");
        assert_eq!(run(Rule::CollapseSpaces, "a\t\tb"), "a\t\tb");
        assert_eq!(run(Rule::CollapseSpaces, "a\n\nb"), "a\n\nb");
    }

    #[test]
    fn numbered_markers_start_paragraphs() {
        assert_eq!(
            run(Rule::NumberedBreaks, "Steps: 1. Do X 2. Do Y"),
            "Steps:\n\n1. Do X\n\n2. Do Y"
        );
    }

    #[test]
    fn numbered_marker_absorbs_existing_line_break() {
        assert_eq!(run(Rule::NumberedBreaks, "Steps:\n1. Go"), "Steps:\n\n1. Go");
    }

    #[test]
    fn decimals_are_not_markers() {
        assert_eq!(run(Rule::NumberedBreaks, "rate 7.5 percent"), "rate 7.5 percent");
    }

    #[test]
    fn sentence_breaks_split_before_capitals() {
        assert_eq!(
            run(Rule::SentenceBreaks, "Save early! Then invest? Yes."),
            "Save early!\n\nThen invest?\n\nYes."
        );
    }

    #[test]
    fn sentence_breaks_split_abbreviations_too() {
        assert_eq!(run(Rule::SentenceBreaks, "Mr. Rao"), "Mr.\n\nRao");
    }

    #[test]
    fn sentence_breaks_leave_list_markers_intact() {
        assert_eq!(run(Rule::SentenceBreaks, "\n\n1. Open"), "\n\n1. Open");
        assert_eq!(run(Rule::SentenceBreaks, "Rs 500. Then"), "Rs 500. Then");
    }

    #[test]
    fn sentence_breaks_ignore_lowercase() {
        assert_eq!(run(Rule::SentenceBreaks, "e.g. rice"), "e.g. rice");
    }

    #[test]
    fn sentence_then_number_starts_paragraph() {
        assert_eq!(
            run(Rule::SentenceNumberBreaks, "Do X. \n\n2. Do Y"),
            "Do X.\n\n2. Do Y"
        );
    }

    #[test]
    fn sentence_then_number_keeps_markers_together() {
        assert_eq!(run(Rule::SentenceNumberBreaks, "1. 2. Go"), "1. 2. Go");
        assert_eq!(run(Rule::SentenceNumberBreaks, "Paid 500. 2. Next"), "Paid 500. 2. Next");
    }

    #[test]
    fn section_emoji_does_not_split_a_list_marker() {
        assert_eq!(run(Rule::SectionEmojiBreaks, "\n\n1. 💡 Save"), "\n\n1. 💡 Save");
        assert_eq!(run(Rule::SectionEmojiBreaks, "Step 1. 💰 Save"), "Step 1. 💰 Save");
    }

    #[test]
    fn section_emoji_after_sentence_starts_paragraph() {
        assert_eq!(run(Rule::SectionEmojiBreaks, "Done. 💡 Next tip"), "Done.\n\n💡 Next tip");
        for emoji in SECTION_EMOJI {
            let input = format!("Ok!{emoji}");
            assert_eq!(run(Rule::SectionEmojiBreaks, &input), format!("Ok!\n\n{emoji}"));
        }
    }

    #[test]
    fn other_emoji_do_not_trigger_breaks() {
        assert_eq!(run(Rule::SectionEmojiBreaks, "Done. 🙂 ok"), "Done. 🙂 ok");
        assert_eq!(run(Rule::SectionEmojiBreaks, "Done. 😀 ok"), "Done. 😀 ok");
    }

    #[test]
    fn trim_strips_surrounding_whitespace() {
        assert_eq!(run(Rule::Trim, "\n\n hi \n"), "hi");
    }

    #[test]
    fn untouched_input_is_borrowed() {
        assert!(matches!(Rule::StripBold.apply("plain"), Cow::Borrowed(_)));
    }
}
