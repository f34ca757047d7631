mod replay;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use replay::replay;
use scrollmap::{
    recording::{RecordingObserver, RecordingOverlay, RecordingRenderer},
    DocumentFetcher, HttpFetcher, LoadCause, StoryApp, StoryConfig, StoryEvent,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless rehearsal of a scrollmap story")]
struct Args {
    /// Story configuration JSON; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory, or the http(s) URL the data paths resolve against
    source: String,

    /// Scene indices to scroll through, in order
    steps: Vec<usize>,
}

/// Reads story datasets from a local directory
struct FileFetcher {
    root: PathBuf,
}

#[async_trait(?Send)]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<Value, LoadCause> {
        let file = self.root.join(path);
        let text = tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| LoadCause::Network(format!("{}: {}", file.display(), e)))?;
        serde_json::from_str(&text).map_err(|e| LoadCause::Parse(e.to_string()))
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Treats the URL as a directory so relative data paths resolve beneath it
fn directory_url(source: &str) -> String {
    if source.ends_with('/') {
        source.to_string()
    } else {
        format!("{}/", source)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            StoryConfig::from_json_str(&text)?
        }
        None => StoryConfig::default(),
    };

    let fetcher: Box<dyn DocumentFetcher> = if is_url(&args.source) {
        config.data.base_url = Some(directory_url(&args.source));
        Box::new(HttpFetcher::from_config(&config.data)?)
    } else {
        Box::new(FileFetcher {
            root: PathBuf::from(&args.source),
        })
    };

    let mut app = StoryApp::new(
        config,
        RecordingRenderer::new(),
        RecordingObserver::new(),
        RecordingOverlay::default(),
    );
    app.bootstrap(fetcher.as_ref()).await?;
    app.dispatch(StoryEvent::Ready)?;
    replay(&mut app, &args.steps)?;

    for command in app.renderer().commands() {
        println!("{}", command);
    }
    Ok(())
}
