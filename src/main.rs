mod api;
mod args;
mod models;
mod render;
mod transform;

use args::Args;
use clap::Parser;
use render::RenderOptions;
use reqwest::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = Client::new();

    println!(
        "[INFO] Looking up {} on {} for {}",
        args.username, args.host, args.year,
    );

    // The profile fetch only preloads the avatar, so it runs alongside the
    // main fetch and is allowed to fail.
    let (profile, response) = tokio::join!(
        api::fetch_user_by_username(&client, &args.host, &args.username),
        api::fetch_issues_by_username_and_year(&client, &args.host, &args.username, args.year),
    );

    match profile {
        Ok(user) => {
            if let Some(url) = user.picture.as_ref().and_then(|p| p.url.as_deref()) {
                println!("[INFO] Avatar: {}", url);
            }
        }
        Err(e) => eprintln!("[WARN] Could not prefetch profile: {}", e),
    }

    let response = response
        .map_err(|e| anyhow::anyhow!("Failed to fetch activity for {}: {}", args.username, e))?;
    let summary = transform::transform(&response, args.year);

    render::render(
        &summary,
        &RenderOptions {
            json: args.json,
            issue_limit: args.limit,
        },
    )?;

    Ok(())
}
