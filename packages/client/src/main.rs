use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use uuid::Uuid;

use client::api::ApiClient;
use client::uploader::{Observer, UploadPhase, UploadRequest, Uploader};
use common::types::UpdateVideoRequest;

#[derive(Parser)]
#[command(name = "clipvault", about = "Upload and manage videos from the command line")]
struct Cli {
    /// Server base URL.
    #[arg(long, env = "CLIPVAULT_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Bearer token issued by the identity provider.
    #[arg(long, env = "CLIPVAULT_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a video file and create its catalog record.
    Upload {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// CDN cloud to upload into.
        #[arg(long, env = "CLIPVAULT_CLOUD_NAME")]
        cloud_name: String,
        #[arg(long, default_value = "video-uploads")]
        folder: String,
        #[arg(long, env = "CLIPVAULT_CDN_API_BASE", default_value = common::media::DEFAULT_API_BASE)]
        cdn_api_base: String,
    },
    /// List all videos in the feed.
    List,
    /// Ask a question about a video's visual content.
    Ask { id: Uuid, question: String },
    /// Change a video's title and/or description.
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a video and its CDN asset.
    Delete { id: Uuid },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.server, &cli.token)?;

    match cli.command {
        Command::Upload {
            file,
            title,
            description,
            cloud_name,
            folder,
            cdn_api_base,
        } => {
            let uploader = Uploader::new(&api, &cloud_name, &folder, &cdn_api_base)?;
            let observer: Observer = Arc::new(|phase| match phase {
                UploadPhase::Idle => {}
                UploadPhase::Signing => {
                    println!("{} requesting upload signature", style("→").cyan());
                }
                UploadPhase::Uploading(percent) => {
                    print!("\r{} uploading {percent:>3}%", style("→").cyan());
                    let _ = std::io::stdout().flush();
                }
                UploadPhase::Persisting => {
                    println!("\n{} saving video record", style("→").cyan());
                }
                UploadPhase::Done => {
                    println!("{} upload complete", style("✓").green());
                }
                UploadPhase::Failed(message) => {
                    eprintln!("\n{} {message}", style("✗").red());
                }
            });

            let record = uploader.upload(
                &UploadRequest {
                    file: &file,
                    title,
                    description,
                },
                &observer,
            )?;
            println!("{} {}", style("id:").dim(), record.id);
        }
        Command::List => {
            for video in api.list_videos()? {
                println!(
                    "{}  {}  {}s  {}",
                    style(video.id).dim(),
                    style(&video.title).bold(),
                    video.duration,
                    video.created_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Command::Ask { id, question } => {
            let res = api.ask_question(id, &question)?;
            println!("{}", res.answer);
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let record = api.update_video(id, &UpdateVideoRequest { title, description })?;
            println!("{} updated \"{}\"", style("✓").green(), record.title);
        }
        Command::Delete { id } => {
            api.delete_video(id)?;
            println!("{} deleted {id}", style("✓").green());
        }
    }

    Ok(())
}
