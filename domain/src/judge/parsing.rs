//! Judge response parsing.
//!
//! Extracts the synthesized answer and the reasoning from the judge model's
//! free-form reply. Pure text matching, no I/O. Parsing never fails: output
//! without a recognizable final-answer marker degrades to an unstructured
//! verdict carrying the whole reply.
//!
//! # Markers
//!
//! | Section | Accepted markers (ASCII case-insensitive) |
//! |---------|-------------------------------------------|
//! | Final answer | `FINAL_ANSWER:`, `FINAL:` |
//! | Reasoning | `REASONING:`, `REASON:` |
//!
//! A marker only counts at the start of a line (after optional whitespace
//! or `**`) or right after a `|` separator, so prose such as "the main
//! reason: cost" stays inside its section.

use crate::fusion::value_objects::{JudgeVerdict, MISSING_REASONING};

const FINAL_MARKERS: [&str; 2] = ["FINAL_ANSWER:", "FINAL:"];
const REASONING_MARKERS: [&str; 2] = ["REASONING:", "REASON:"];

/// Parse the judge's reply into a [`JudgeVerdict`].
///
/// # Examples
///
/// ```
/// use fusion_domain::judge::parsing::parse_judge_response;
///
/// let verdict = parse_judge_response("FINAL: merged text | REASON: merged reasoning");
/// assert_eq!(verdict.final_answer, "merged text");
/// assert_eq!(verdict.reasoning, "merged reasoning");
/// assert!(verdict.structured);
///
/// let verdict = parse_judge_response("no markers at all");
/// assert_eq!(verdict.final_answer, "no markers at all");
/// assert!(!verdict.structured);
/// ```
pub fn parse_judge_response(raw: &str) -> JudgeVerdict {
    // ASCII uppercasing keeps byte offsets aligned with `raw`
    let upper = raw.to_ascii_uppercase();

    let end = upper.len();
    let Some((final_start, final_end)) = find_marker(&upper, 0, end, &FINAL_MARKERS) else {
        return JudgeVerdict::unstructured(raw);
    };

    let (answer, reasoning) = match find_marker(&upper, final_end, end, &REASONING_MARKERS) {
        Some((start, end)) => (&raw[final_end..start], Some(&raw[end..])),
        // Reasoning may precede the answer
        None => match find_marker(&upper, 0, final_start, &REASONING_MARKERS) {
            Some((_, end)) => (&raw[final_end..], Some(&raw[end..final_start])),
            None => (&raw[final_end..], None),
        },
    };

    let answer = clean_section(answer);
    if answer.is_empty() {
        return JudgeVerdict::unstructured(raw);
    }

    let reasoning = reasoning
        .map(clean_section)
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| MISSING_REASONING.to_string());

    JudgeVerdict::new(answer, reasoning)
}

/// Earliest anchored marker within `haystack[from..to]`, as absolute
/// `(start, end)` byte offsets.
fn find_marker(
    haystack: &str,
    from: usize,
    to: usize,
    markers: &[&str],
) -> Option<(usize, usize)> {
    markers
        .iter()
        .filter_map(|m| {
            haystack[from..to]
                .match_indices(m)
                .map(|(i, _)| from + i)
                .find(|&start| is_anchored(haystack, start))
                .map(|start| (start, start + m.len()))
        })
        .min_by_key(|(start, _)| *start)
}

/// Whether only whitespace or `*` separate `pos` from a line start or `|`.
fn is_anchored(haystack: &str, pos: usize) -> bool {
    let before = haystack[..pos]
        .trim_end_matches(|c: char| c == '*' || (c.is_whitespace() && c != '\n'));
    matches!(before.chars().next_back(), None | Some('\n') | Some('|'))
}

/// Strip surrounding whitespace, `|` separators and markdown bold residue.
fn clean_section(section: &str) -> String {
    section
        .trim_matches(|c: char| c.is_whitespace() || c == '|' || c == '*')
        .to_string()
}
