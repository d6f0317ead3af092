// Only ASCII letters and CJK ideographs survive; an empty result is legal
// and produces names of the form `_001.jpg`.
pub fn sanitize_prefix(name: &str) -> String {
    name.chars().filter(|&ch| is_prefix_char(ch)).collect()
}

fn is_prefix_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ('\u{4e00}'..='\u{9fa5}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::sanitize_prefix;

    #[test]
    fn keeps_latin_letters_and_drops_the_rest() {
        assert_eq!(sanitize_prefix("Trip 2023"), "Trip");
        assert_eq!(sanitize_prefix("my-photos_v2 (final)"), "myphotosvfinal");
    }

    #[test]
    fn keeps_cjk_ideographs() {
        assert_eq!(sanitize_prefix("照片-2023!"), "照片");
        assert_eq!(sanitize_prefix("旅行photos 01"), "旅行photos");
    }

    #[test]
    fn empty_result_is_accepted() {
        assert_eq!(sanitize_prefix("2023-01-01"), "");
        assert_eq!(sanitize_prefix(""), "");
    }

    #[test]
    fn non_cjk_unicode_is_dropped() {
        // Kana and Hangul sit outside the retained range, matching the
        // reference behavior.
        assert_eq!(sanitize_prefix("さくらphoto"), "photo");
        assert_eq!(sanitize_prefix("한글pics"), "pics");
    }
}
