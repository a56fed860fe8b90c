/// Byte shape of a date anchor: `d` stands for any ASCII digit.
const DATE_ANCHOR: &[u8; 8] = b"dd/dd/dd";

fn is_anchor_at(bytes: &[u8], at: usize) -> bool {
    bytes.get(at..at + DATE_ANCHOR.len()).is_some_and(|window| {
        window.iter().zip(DATE_ANCHOR).all(|(&b, &shape)| match shape {
            b'd' => b.is_ascii_digit(),
            _ => b == shape,
        })
    })
}

/// Split a blob of extracted text in front of every date anchor.
///
/// The split is zero-width, so each fragment keeps its leading date. Text ahead
/// of the first anchor comes back as its own fragment. Fragments are trimmed;
/// blanks and the extractor's missing-value marker are dropped.
pub fn split_fragments<'a>(text: &'a str, missing_marker: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let bytes = text.as_bytes();
    // An anchor always begins on an ASCII digit, so every cut is a char boundary.
    let mut cuts: Vec<usize> = (0..bytes.len()).filter(|&i| is_anchor_at(bytes, i)).collect();
    cuts.push(text.len());

    let mut start = 0;
    cuts.into_iter()
        .map(move |end| {
            let piece = &text[start..end];
            start = end;
            piece.trim()
        })
        .filter(move |piece| !piece.is_empty() && *piece != missing_marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        split_fragments(text, "nan").collect()
    }

    #[test]
    fn splits_before_each_date() {
        let text = "07/11/25 E 5- 1 - 1 FB 1\n07/10/25 M 2-2-2";
        assert_eq!(split(text), ["07/11/25 E 5- 1 - 1 FB 1", "07/10/25 M 2-2-2"]);
    }

    #[test]
    fn keeps_leading_text_as_own_fragment() {
        assert_eq!(split("Date Draw 07/11/25 E 5-1-1"), ["Date Draw", "07/11/25 E 5-1-1"]);
    }

    #[test]
    fn no_anchor_yields_whole_blob() {
        assert_eq!(split("  garbage text no date "), ["garbage text no date"]);
    }

    #[test]
    fn drops_blank_and_missing_marker() {
        assert!(split("").is_empty());
        assert!(split("   \n ").is_empty());
        assert!(split("nan").is_empty());
        assert!(split(" nan\n").is_empty());
        assert_eq!(split_fragments("N/A", "N/A").count(), 0);
    }

    #[test]
    fn overlapping_anchor_candidates_each_cut() {
        assert_eq!(split("01/02/03/04"), ["01/", "02/03/04"]);
    }

    #[test]
    fn short_tail_is_not_an_anchor() {
        assert_eq!(split("x 07/11/2"), ["x 07/11/2"]);
    }

    #[test]
    fn non_ascii_noise_is_preserved() {
        assert_eq!(split("é 07/11/25 E 1-2-3 ✓"), ["é", "07/11/25 E 1-2-3 ✓"]);
    }
}
