//! Caprate Player - terminal client for rating captions.
//!
//! Loads the signed-in identity and the caption set once, then walks
//! the rotation: show a random unvoted caption, submit the vote, mark
//! the caption as done, repeat until the set is exhausted.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use rand::Rng;

mod client;
mod session;

use client::{EngineClient, VoteReply};
use session::RotationSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caprate_player=info".into()),
        )
        .init();

    let engine_url =
        std::env::var("ENGINE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let access_token = std::env::var("ACCESS_TOKEN").ok().filter(|t| !t.is_empty());

    let client = EngineClient::new(&engine_url, access_token);

    match client.me().await? {
        Some(user) => println!(
            "Signed in as {}",
            user.email.as_deref().unwrap_or(user.id.as_str())
        ),
        None => println!(
            "Not signed in. Open {engine_url}/login in a browser, then set ACCESS_TOKEN.\n\
             Votes will be rejected until then."
        ),
    }

    let captions = client.captions().await.context("loading captions")?;
    if captions.is_empty() {
        println!("No captions found yet.");
        return Ok(());
    }

    let mut session = RotationSession::from_wire(captions);
    println!("{} captions to rate.\n", session.total());

    let stdin = io::stdin();
    let mut rng = rand::thread_rng();

    loop {
        let Some(caption) = session.select_with(|len| rng.gen_range(0..len)) else {
            println!("You've rated all available captions. Nice.");
            break;
        };

        println!(
            "[{} remaining] {}",
            session.remaining(),
            caption.content.as_deref().unwrap_or("(no content)")
        );
        print!("  [u]pvote  [d]ownvote  [s]kip  [q]uit > ");
        io::stdout().flush().context("flush prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("read input")? == 0 {
            break;
        }

        let value = match line.trim() {
            "u" => 1,
            "d" => -1,
            "s" => continue,
            "q" => break,
            other => {
                println!("  unrecognized input {other:?}\n");
                continue;
            }
        };

        // One update per completed submission, applied in completion
        // order; the next selection only runs after this one resolves.
        match client.vote(caption.id.as_str(), value).await? {
            VoteReply::Accepted(vote) => {
                println!("  recorded {:+} for caption {}\n", vote.vote_value, vote.caption_id);
                session.record_vote(caption.id);
            }
            VoteReply::AlreadyVoted => {
                // The durable store already has this pair; just advance.
                println!("  already voted for this caption, moving on\n");
                session.record_vote(caption.id);
            }
            VoteReply::Unauthenticated => {
                println!("  not signed in; open {engine_url}/login and set ACCESS_TOKEN\n");
            }
            VoteReply::Rejected(message) => {
                println!("  vote rejected: {message}\n");
            }
            VoteReply::Failed(message) => {
                println!("  vote failed: {message}\n");
            }
        }
    }

    Ok(())
}
