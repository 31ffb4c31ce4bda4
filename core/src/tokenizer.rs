/// Tokenize text by lowercasing and splitting on whitespace.
///
/// Corpus passages and queries go through the same function so that their terms line up.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_owned).collect()
}
