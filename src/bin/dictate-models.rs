// Downloads the GGML models the runner and verifier load. The registry of
// known-good artifacts lives in the library (`dictate::models`) so the
// downloader, the verifier's hints, and the runner all agree on names.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;

use dictate::models::{self, MODELS};

#[derive(Parser, Debug)]
#[command(name = "dictate-models")]
#[command(about = "Download Whisper models for dictate", long_about = None)]
struct Args {
    /// List supported model names and exit.
    #[arg(long)]
    list: bool,

    /// Model name (examples: tiny, base, small.en).
    #[arg(long, required_unless_present = "list")]
    name: Option<String>,

    /// Target directory (defaults to DICTATE_MODEL_DIR or ./models).
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        print!("{}", model_list_string());
        return Ok(());
    }

    let name = args.name.as_deref().expect("clap should require --name");
    let spec = models::lookup(name).with_context(|| {
        format!("unknown model '{name}'. Run with --list to see supported models.")
    })?;

    let dir = args.dir.unwrap_or_else(models::model_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create target dir: {}", dir.display()))?;

    let dest_path = dir.join(spec.filename);
    if dest_path.exists() {
        println!("already present: {}", dest_path.display());
        return Ok(());
    }

    println!("downloading {}", spec.filename);
    println!("    {}", spec.url);

    let client = Client::builder()
        .user_agent("dictate-models")
        .build()
        .context("failed to build HTTP client")?;

    fetch_to_path(&client, spec.url, &dest_path)?;

    println!("saved: {}", dest_path.display());
    Ok(())
}

fn model_list_string() -> String {
    let mut out = String::from("Supported models:\n");
    for m in MODELS {
        out.push_str("  - ");
        out.push_str(m.name);
        out.push('\n');
    }
    out
}

/// Download a URL into `dest_path` safely:
/// - download to `dest_path.part`
/// - fsync + rename to final path
fn fetch_to_path(client: &Client, url: &str, dest_path: &Path) -> Result<()> {
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?
        .error_for_status()
        .with_context(|| format!("download failed (bad status): {url}"))?;

    let total = resp.content_length();
    fetch_to_path_from_reader(resp, total, dest_path)
}

fn fetch_to_path_from_reader<R: Read>(
    mut reader: R,
    total_bytes: Option<u64>,
    dest_path: &Path,
) -> Result<()> {
    let pb = match total_bytes {
        Some(total) if total > 0 => ProgressBar::new(total),
        _ => ProgressBar::new_spinner(),
    };
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} {bytes}/{total_bytes} {bar:40.cyan/blue} {eta}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("failed to create temp file: {}", tmp_path.display()))?;

        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])?;
            pb.inc(n as u64);
        }

        file.sync_all()?;
        pb.finish_and_clear();

        fs::rename(&tmp_path, dest_path)
            .with_context(|| format!("failed to move into place: {}", dest_path.display()))?;

        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        pb.finish_and_clear();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_list_names_every_registry_entry() {
        let list = model_list_string();
        for m in MODELS {
            assert!(list.contains(&format!("  - {}\n", m.name)));
        }
    }

    #[test]
    fn args_parse_requires_name_unless_list() {
        let err = Args::try_parse_from(["dictate-models"])
            .err()
            .expect("expected missing-args error");
        assert!(err.to_string().contains("--name"));

        let args = Args::try_parse_from(["dictate-models", "--list"]).expect("parse list args");
        assert!(args.list);
        assert!(args.name.is_none());
    }

    #[test]
    fn fetch_writes_and_renames_into_place() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dest_path = dir.path().join("ggml-tiny.bin");
        let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

        let bytes = b"ggml stub".to_vec();
        fetch_to_path_from_reader(
            std::io::Cursor::new(bytes.clone()),
            Some(bytes.len() as u64),
            &dest_path,
        )?;

        assert!(dest_path.exists());
        assert!(!tmp_path.exists());
        assert_eq!(fs::read(&dest_path)?, bytes);
        Ok(())
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("simulated read failure"))
        }
    }

    #[test]
    fn fetch_cleans_up_part_file_on_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dest_path = dir.path().join("ggml-tiny.bin");
        let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

        let err = fetch_to_path_from_reader(FailingReader, Some(16), &dest_path).unwrap_err();
        assert!(err.to_string().contains("simulated read failure"));
        assert!(!dest_path.exists());
        assert!(!tmp_path.exists());
        Ok(())
    }
}
