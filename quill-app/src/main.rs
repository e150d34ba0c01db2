use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use quill_social::{Credentials, PostError, StatusPoster, XApi};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod input;

const ENV_HELP: &str = "\
Environment variables required:
  TWITTER_API_KEY          Your app API key
  TWITTER_API_KEY_SECRET   Your app API key secret
  TWITTER_BEARER_TOKEN     Your app bearer token (optional for posting)
  TWITTER_ACCESS_TOKEN     Your user access token
  TWITTER_TOKEN_SECRET     Your user access token secret

Also supported via a .env file in the working directory.";

/// Post a status update to X from the command line.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Posts a status update to X (Twitter)")]
#[command(after_help = ENV_HELP)]
struct Args {
    /// Text of the post; reads piped stdin when omitted.
    text: Vec<String>,
}

/// Logs go to stderr only; this program writes no files. Quiet by default,
/// `RUST_LOG` overrides.
fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
    Ok(())
}

/// One post attempt; returns the success line to print.
async fn dispatch(poster: &impl StatusPoster, text: &str) -> std::result::Result<String, PostError> {
    let posted = poster.create_post(text).await?;
    Ok(format!("Tweet posted: {}", posted.url()))
}

fn failure_report(err: &PostError) -> String {
    format!("Failed to post tweet.\n{err}")
}

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env is merged in first; real environment variables win.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging()?;

    let resolved = input::resolve_text(&args.text)
        .await
        .context("failed to read stdin")?;
    let Some(text) = resolved else {
        eprintln!("Error: No tweet text provided.");
        eprintln!();
        eprint!("{}", Args::command().render_help());
        std::process::exit(1);
    };
    tracing::debug!(
        chars = text.chars().count(),
        from_args = !args.text.is_empty(),
        "input.resolved"
    );

    let creds = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let api = match XApi::new(creds) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("{}", failure_report(&err));
            std::process::exit(1);
        }
    };

    match dispatch(&api, &text).await {
        Ok(line) => {
            println!("{line}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", failure_report(&err));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quill_social::PostedTweet;
    use quill_social::twitter::types::ApiFailure;
    use std::sync::Mutex;

    struct FakePoster {
        outcome: Mutex<Option<std::result::Result<PostedTweet, PostError>>>,
    }

    impl FakePoster {
        fn with(outcome: std::result::Result<PostedTweet, PostError>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
            }
        }
    }

    #[async_trait]
    impl StatusPoster for FakePoster {
        async fn create_post(
            &self,
            _text: &str,
        ) -> std::result::Result<PostedTweet, PostError> {
            self.outcome
                .lock()
                .unwrap()
                .take()
                .expect("create_post called exactly once")
        }
    }

    #[tokio::test]
    async fn successful_dispatch_prints_the_status_url() {
        let poster = FakePoster::with(Ok(PostedTweet {
            id: "12345".into(),
            text: "hello".into(),
        }));
        let line = dispatch(&poster, "hello").await.unwrap();
        assert_eq!(line, "Tweet posted: https://x.com/i/web/status/12345");
    }

    #[tokio::test]
    async fn structured_failure_reports_status_title_and_detail() {
        let failure = ApiFailure::from_status_body(
            403,
            r#"{"status":403,"title":"Forbidden","detail":"duplicate content"}"#,
        )
        .unwrap();
        let poster = FakePoster::with(Err(PostError::Api(failure)));
        let err = dispatch(&poster, "hello").await.unwrap_err();
        let report = failure_report(&err);
        assert!(report.starts_with("Failed to post tweet.\n"));
        assert!(report.contains("Status: 403"));
        assert!(report.contains("Title: Forbidden"));
        assert!(report.contains("Detail: duplicate content"));
    }

    #[test]
    fn help_is_requested_by_short_and_long_flags() {
        // clap handles -h/--help anywhere among the arguments; both must
        // parse as a help request rather than as post text.
        for argv in [
            vec!["quill", "-h"],
            vec!["quill", "--help"],
            vec!["quill", "some", "text", "--help"],
        ] {
            let err = Args::try_parse_from(argv).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn plain_words_parse_as_post_text() {
        let args = Args::try_parse_from(["quill", "hello", "world"]).unwrap();
        assert_eq!(args.text, vec!["hello", "world"]);
    }

    #[test]
    fn help_text_documents_the_environment() {
        let rendered = Args::command().render_help().to_string();
        assert!(rendered.contains("TWITTER_API_KEY"));
        assert!(rendered.contains("TWITTER_TOKEN_SECRET"));
    }
}
