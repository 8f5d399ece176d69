use std::path::PathBuf;

use clap::Parser;
use reqwest::multipart::{Form, Part};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Upload a file through a running upload relay", long_about = None)]
struct Cli {
    /// Relay base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Multipart field name to send the file under.
    #[arg(short, long, default_value = "file")]
    field: String,

    /// File to upload.
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let content = tokio::fs::read(&cli.file).await?;
    let filename = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or("file path has no file name")?;
    let mime = mime_guess::from_path(&cli.file).first_or_octet_stream();

    let part = Part::bytes(content)
        .file_name(filename)
        .mime_str(mime.as_ref())?;
    let form = Form::new().part(cli.field, part);

    let res = reqwest::Client::new()
        .post(&cli.url)
        .multipart(form)
        .send()
        .await?;

    let status = res.status();
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let body = res.bytes().await?;

    eprintln!("Status: {}", status);
    eprintln!("Content-Type: {}", content_type);

    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", String::from_utf8_lossy(&body)),
    }

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
