//! Resolution of the text to post.
//!
//! CLI arguments win over piped stdin; stdin is only consulted when no
//! argument text survived joining and trimming, and only when it is not an
//! interactive terminal.

use std::io::IsTerminal;
use tokio::io::AsyncReadExt;

/// Join CLI words with single spaces and trim. `None` when nothing remains.
pub fn text_from_args(words: &[String]) -> Option<String> {
    let joined = words.join(" ").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

/// Drain piped stdin to end-of-stream and trim. Interactive stdin reads as
/// nothing at all.
pub async fn text_from_stdin() -> std::io::Result<Option<String>> {
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    let trimmed = buf.trim().to_string();
    Ok((!trimmed.is_empty()).then_some(trimmed))
}

/// Resolve the post text per the argument-over-stdin precedence.
pub async fn resolve_text(words: &[String]) -> std::io::Result<Option<String>> {
    if let Some(text) = text_from_args(words) {
        return Ok(Some(text));
    }
    text_from_stdin().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn args_are_joined_with_single_spaces() {
        assert_eq!(
            text_from_args(&words(&["hello", "from", "the", "CLI"])).as_deref(),
            Some("hello from the CLI")
        );
    }

    #[test]
    fn joined_args_are_trimmed() {
        assert_eq!(
            text_from_args(&words(&["  padded", "text  "])).as_deref(),
            Some("padded text")
        );
    }

    #[test]
    fn whitespace_only_args_resolve_to_nothing() {
        assert!(text_from_args(&words(&[])).is_none());
        assert!(text_from_args(&words(&["", "  "])).is_none());
    }

    #[tokio::test]
    async fn argument_text_wins_without_consulting_stdin() {
        let resolved = resolve_text(&words(&["from", "args"])).await.unwrap();
        assert_eq!(resolved.as_deref(), Some("from args"));
    }
}
