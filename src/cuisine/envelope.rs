//! Recipe envelopes: `\begin{recipe}[label]{title}{servings}{time} ... \end{recipe}`

use std::ops::Range;

const BEGIN: &str = r"\begin{recipe}";
const END: &str = r"\end{recipe}";

/// The header fields and body of one recipe envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<'a> {
    /// Optional `[label]`, not used yet
    pub label: Option<&'a str>,
    pub title: &'a str,
    pub servings: &'a str,
    pub time: &'a str,
    /// Everything between the header and `\end{recipe}`
    pub content: &'a str,
    pub span: Range<usize>,
}

/// Find the first well-formed envelope in `text`
pub fn find_envelope(text: &str) -> Option<Envelope<'_>> {
    text.match_indices(BEGIN)
        .find_map(|(start, _)| envelope_at(text, start))
}

/// Return every `\begin{recipe}...\end{recipe}` span in order, verbatim
pub fn split_envelopes(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(begin) = text[pos..].find(BEGIN).map(|i| pos + i) {
        let body = begin + BEGIN.len();
        let Some(end) = text[body..].find(END).map(|i| body + i + END.len()) else {
            break;
        };
        spans.push(&text[begin..end]);
        pos = end;
    }
    spans
}

fn envelope_at(text: &str, start: usize) -> Option<Envelope<'_>> {
    let mut pos = skip_whitespace(text, start + BEGIN.len());

    let mut label = None;
    if text[pos..].starts_with('[') {
        let close = pos + 1 + text[pos + 1..].find(']')?;
        let candidate = &text[pos + 1..close];
        if !candidate.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return None;
        }
        label = Some(candidate);
        pos = skip_whitespace(text, close + 1);
    }

    let (title, pos) = header_field(text, pos)?;
    let (servings, pos) = header_field(text, skip_whitespace(text, pos))?;
    let (time, pos) = header_field(text, skip_whitespace(text, pos))?;

    let content_end = pos + text[pos..].find(END)?;
    Some(Envelope {
        label,
        title,
        servings,
        time,
        content: &text[pos..content_end],
        span: start..content_end + END.len(),
    })
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

/// `{...}` without nested braces
fn header_field(text: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = &text[pos..];
    if !rest.starts_with('{') {
        return None;
    }
    let close = rest[1..].find(['{', '}'])? + 1;
    if !rest[close..].starts_with('}') {
        return None;
    }
    Some((&rest[1..close], pos + close + 1))
}

/// Drop trailing LaTeX commands and the `"=` hyphenation ligature from a title
pub fn clean_title(title: &str) -> String {
    let title = match title.find('\\') {
        Some(command) => &title[..command],
        None => title,
    };
    title.replace("\"=", "-").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let text = r"\begin{recipe} [myLabel] {Lasagna} {4 persons} {30 minutes} the content \end{recipe}";
        let envelope = find_envelope(text).unwrap();
        assert_eq!(envelope.label, Some("myLabel"));
        assert_eq!(envelope.title, "Lasagna");
        assert_eq!(envelope.servings, "4 persons");
        assert_eq!(envelope.time, "30 minutes");
        assert_eq!(envelope.content, " the content ");
        assert_eq!(envelope.span, 0..text.len());
    }

    #[test]
    fn test_header_without_label_over_lines() {
        let text = "intro\n\\begin{recipe}\n{Soup}\n{2}\n{1 hour}\nBoil.\n\\end{recipe}\noutro";
        let envelope = find_envelope(text).unwrap();
        assert_eq!(envelope.label, None);
        assert_eq!(envelope.title, "Soup");
        assert_eq!(envelope.content, "\nBoil.\n");
    }

    #[test]
    fn test_missing_header_field() {
        assert!(find_envelope(r"\begin{recipe}{Soup}{2}{} Boil. \end{recipe}").is_some());
        assert!(find_envelope(r"\begin{recipe}{Soup}{2} Boil. \end{recipe}").is_none());
        assert!(find_envelope(r"\begin{recipe}{Soup} Boil. \end{recipe}").is_none());
    }

    #[test]
    fn test_nested_braces_in_header() {
        assert!(find_envelope(r"\begin{recipe}{So{u}p}{2}{3} x \end{recipe}").is_none());
    }

    #[test]
    fn test_invalid_label_rejects_envelope() {
        assert!(find_envelope(r"\begin{recipe}[my label]{A}{1}{2} x \end{recipe}").is_none());
    }

    #[test]
    fn test_missing_end() {
        assert!(find_envelope(r"\begin{recipe}{A}{1}{2} never closed").is_none());
        assert!(find_envelope("no recipe here").is_none());
    }

    #[test]
    fn test_first_well_formed_envelope_wins() {
        let text = r"\begin{recipe}{broken} \end{recipe} \begin{recipe}{Good}{1}{2} ok \end{recipe}";
        assert_eq!(find_envelope(text).unwrap().title, "Good");
    }

    #[test]
    fn test_content_is_non_greedy() {
        let text = r"\begin{recipe}{A}{1}{2} first \end{recipe} \begin{recipe}{B}{1}{2} second \end{recipe}";
        assert_eq!(find_envelope(text).unwrap().content, " first ");
    }

    #[test]
    fn test_split_envelopes() {
        let text = "% collection\n\\begin{recipe}{A}{1}{2} a \\end{recipe}\n\n\\begin{recipe}{B}{1}{2}\nb\n\\end{recipe}\n";
        let spans = split_envelopes(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], r"\begin{recipe}{A}{1}{2} a \end{recipe}");
        assert!(spans[1].starts_with(r"\begin{recipe}{B}"));
        assert!(spans[1].ends_with(END));
    }

    #[test]
    fn test_split_without_envelopes() {
        assert!(split_envelopes("").is_empty());
        assert!(split_envelopes(r"\begin{recipe} unterminated").is_empty());
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title(r"Lasagna\vspace{1cm}"), "Lasagna");
        assert_eq!(clean_title("Crème fra\"=iche"), "Crème fra-iche");
        assert_eq!(clean_title("  Pancakes  "), "Pancakes");
    }
}
