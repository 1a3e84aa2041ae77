//! Pulse command line client
//!
//! A thin terminal front end over `pulse-client`: register, log in,
//! post, delete, read the feed, and follow it live.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_client::adapters::{FileSessionStore, HttpObjectStorage, HttpStatusApi, WsLiveUpdates};
use pulse_client::app::{AuthService, FeedSynchronizer};
use pulse_client::domain::entities::{
    Credentials, ImageFormat, ImageUpload, Post, PostDraft, PostId, Registration,
};
use pulse_client::domain::ports::LiveEvent;
use pulse_client::Config;

#[derive(Parser)]
#[command(name = "pulse", version, about = "Client for the Pulse status-sharing service")]
struct Cli {
    #[command(subcommand)]
    command: PulseCommand,
}

#[derive(Subcommand)]
enum PulseCommand {
    /// Create an account and start a session
    Register {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and store the session token
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Destroy the stored session
    Logout,
    /// Print the feed once
    Feed,
    /// Print your own posts
    Profile,
    /// Publish a post: text, an image, or both
    Post {
        #[arg(short, long)]
        text: Option<String>,
        /// Path to a JPEG, PNG, GIF, or WebP file
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete one of your posts by id
    Delete { id: String },
    /// Print the feed and keep following live updates (Ctrl-C to stop)
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pulse_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let api = Arc::new(HttpStatusApi::new(config.api_url.clone()));
    let live = Arc::new(WsLiveUpdates::new(config.socket_url.clone()));
    let storage = Arc::new(HttpObjectStorage::new(config.storage_url.clone()));
    let session = Arc::new(FileSessionStore::new(config.session_path.clone()));

    let auth = AuthService::new(api.clone(), session.clone());
    let mut feed = FeedSynchronizer::new(api, live, storage, session);

    match cli.command {
        PulseCommand::Register { username, password } => {
            let registration = Registration {
                username,
                password: password.clone(),
                confirm_password: password,
            };
            match auth.register(&registration).await {
                Ok(_) => println!("Registered and logged in."),
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
        PulseCommand::Login { username, password } => {
            let credentials = Credentials { username, password };
            match auth.login(&credentials).await {
                Ok(_) => println!("Logged in."),
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
        PulseCommand::Logout => {
            auth.logout().map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Logged out.");
        }
        PulseCommand::Feed => match feed.initialize().await {
            Ok(()) => print_posts(feed.posts()),
            Err(e) => eprintln!("{}", e.user_message()),
        },
        PulseCommand::Profile => match feed.fetch_profile().await {
            Ok(profile) => {
                println!("@{}", profile.username);
                print_posts(&profile.posts);
            }
            Err(e) => eprintln!("{}", e.user_message()),
        },
        PulseCommand::Post { text, image } => {
            let mut draft = PostDraft {
                text,
                ..PostDraft::default()
            };
            if let Some(path) = image {
                let format = image_format_for(&path)?;
                let bytes = std::fs::read(&path)?;
                draft = draft.with_image(ImageUpload { bytes, format });
            }
            match feed.create_post(draft).await {
                Ok(post) => println!("Posted {}", post.id),
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
        PulseCommand::Delete { id } => match feed.delete_post(&PostId(id)).await {
            Ok(()) => println!("Deleted."),
            Err(e) => eprintln!("{}", e.user_message()),
        },
        PulseCommand::Watch => {
            if let Err(e) = feed.initialize().await {
                eprintln!("{}", e.user_message());
                return Ok(());
            }
            print_posts(feed.posts());

            let mut subscription = feed
                .subscribe_to_live_updates()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    event = subscription.next_event() => match event {
                        Some(LiveEvent::PostCreated(post)) => {
                            if feed.apply(LiveEvent::PostCreated(post.clone())) {
                                print_post(&post);
                            }
                        }
                        None => {
                            eprintln!("Live channel closed.");
                            break;
                        }
                    },
                }
            }

            subscription.teardown();
        }
    }

    Ok(())
}

fn image_format_for(path: &Path) -> Result<ImageFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
        Some("png") => Ok(ImageFormat::Png),
        Some("gif") => Ok(ImageFormat::Gif),
        Some("webp") => Ok(ImageFormat::Webp),
        _ => anyhow::bail!("Only JPEG, PNG, GIF, and WebP images are allowed"),
    }
}

fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts available");
        return;
    }
    for post in posts {
        print_post(post);
    }
}

fn print_post(post: &Post) {
    println!(
        "{} · {}",
        post.author,
        post.created_at.format("%b %e, %Y %H:%M")
    );
    if let Some(text) = &post.text {
        println!("  {}", text);
    }
    if let Some(url) = &post.image_url {
        println!("  [image] {}", url);
    }
    println!();
}
