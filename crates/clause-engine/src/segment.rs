//! Paragraph segmentation
//!
//! A paragraph is one trimmed, non-empty line of the input.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// 1-based position among the kept paragraphs
    pub number: usize,
    pub text: String,
}

/// Split text into numbered paragraphs, dropping blank lines
pub fn segment(text: &str) -> Vec<Paragraph> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| Paragraph {
            number: i + 1,
            text: line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
        paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_empty_text_has_no_paragraphs() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t\n").is_empty());
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let paragraphs = segment("a\n\nb");
        assert_eq!(
            paragraphs,
            vec![
                Paragraph { number: 1, text: "a".to_string() },
                Paragraph { number: 2, text: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_single_line_is_one_paragraph() {
        let paragraphs = segment("  All workers wear PPE.  ");
        assert_eq!(texts(&paragraphs), vec!["All workers wear PPE."]);
        assert_eq!(paragraphs[0].number, 1);
    }

    #[test]
    fn test_windows_line_endings_are_trimmed() {
        let paragraphs = segment("first\r\nsecond\r\n");
        assert_eq!(texts(&paragraphs), vec!["first", "second"]);
    }

    proptest! {
        #[test]
        fn numbering_is_consecutive(lines in proptest::collection::vec("[a-z ]{0,12}", 0..20)) {
            let text = lines.join("\n");
            let paragraphs = segment(&text);

            let expected: Vec<String> = lines
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();

            prop_assert_eq!(paragraphs.len(), expected.len());
            for (i, (p, e)) in paragraphs.iter().zip(expected.iter()).enumerate() {
                prop_assert_eq!(p.number, i + 1);
                prop_assert_eq!(&p.text, e);
            }
        }
    }
}
