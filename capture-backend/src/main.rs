//! Vault capture: files a single capture into the vault.
//!
//! Content comes from the command line (or stdin when no content arguments
//! are given); `--title <t>` sets the note title and `--image <path>` captures
//! an image file instead. Prints the capture outcome as JSON.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

mod capture;
mod classifier;
mod config;
mod error;
mod metadata;
mod notes;
mod storage;
mod vault;

use capture::{CaptureOutcome, CaptureService};
use classifier::Classifier;
use config::Config;
use error::CaptureResult;
use metadata::TitleFetcher;
use notes::NoteWriter;
use storage::FsStorage;
use vault::VaultLayout;

#[derive(Debug, Default)]
struct Invocation {
    title: Option<String>,
    image: Option<PathBuf>,
    content: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, String> {
    let mut inv = Invocation::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--title" => {
                inv.title = Some(args.next().ok_or("--title needs a value")?);
            }
            "--image" => {
                inv.image = Some(PathBuf::from(args.next().ok_or("--image needs a path")?));
            }
            _ => inv.content.push(arg),
        }
    }
    Ok(inv)
}

async fn run(config: Config, inv: Invocation) -> CaptureResult<CaptureOutcome> {
    log::info!("[VAULT] Using vault at {:?}", config.vault_path);
    let vault = VaultLayout::open(&config.vault_path, Arc::new(FsStorage::new()))?;

    let classifier = Classifier::default().with_empty_folder(config.empty_folder);
    let service = CaptureService::new(classifier, NoteWriter::new(Arc::new(vault)))
        .with_title_fetcher(TitleFetcher::new(&config.fetcher)?);

    if let Some(path) = inv.image {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| error::CaptureError::Read {
                path: path.clone(),
                source,
            })?;
        return service.capture_image(&bytes, inv.title.as_deref()).await;
    }

    let content = if inv.content.is_empty() {
        let mut buf = String::new();
        if let Err(e) = tokio::io::stdin().read_to_string(&mut buf).await {
            log::warn!("[CAPTURE] Failed to read stdin: {}", e);
        }
        buf
    } else {
        inv.content.join(" ")
    };

    service.capture_text(&content, inv.title.as_deref()).await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let inv = match parse_args(std::env::args().skip(1)) {
        Ok(inv) => inv,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: capture-backend [--title <title>] [--image <path>] [content...]");
            std::process::exit(2);
        }
    };

    match run(Config::from_env(), inv).await {
        Ok(outcome) => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize outcome: {}", e),
        },
        Err(e) => {
            log::error!("[CAPTURE] {}", e);
            std::process::exit(1);
        }
    }
}
