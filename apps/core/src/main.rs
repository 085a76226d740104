// Lunara Jewels support chat, terminal edition.
// Reads customer turns from stdin and answers through the session supervisor.

use std::sync::Arc;

use anyhow::Context;
use lunara_core::actors::SupervisorHandle;
use lunara_core::config::Config;
use lunara_core::matcher::IntentMatcher;
use lunara_core::models::QuickReply;
use lunara_core::preflight::run_preflight;
use lunara_core::session::TurnOutcome;
use lunara_core::{build_matcher, telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

fn print_quick_replies(replies: &[QuickReply]) {
    for (i, reply) in replies.iter().enumerate() {
        println!("  [{}] {}", i + 1, reply.label);
    }
}

/// Prints a turn and returns the quick replies now on offer.
fn print_outcome(outcome: TurnOutcome, current: Vec<QuickReply>) -> Vec<QuickReply> {
    match outcome {
        TurnOutcome::Replied {
            bot, quick_replies, ..
        } => {
            println!("bot> {}", bot.text);
            print_quick_replies(&quick_replies);
            quick_replies
        }
        TurnOutcome::Navigate { route, .. } => {
            println!("bot> (opening {})", route);
            current
        }
        TurnOutcome::Ignored => current,
    }
}

async fn chat(matcher: Arc<IntentMatcher>, config: &Config) -> anyhow::Result<()> {
    let supervisor = SupervisorHandle::with_timeout(Arc::clone(&matcher), config.request_timeout);
    let snapshot = supervisor.open_session().await?;
    let session_id = snapshot.session_id.clone();

    for message in &snapshot.messages {
        println!("bot> {}", message.text);
    }
    print_quick_replies(&snapshot.quick_replies);
    let mut current = snapshot.quick_replies;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let input = line.trim();

        if input == "/quit" {
            break;
        }
        if input == "/history" {
            let transcript = supervisor.transcript(&session_id).await?;
            println!("{}", serde_json::to_string_pretty(&transcript)?);
            continue;
        }
        if let Some(text) = input.strip_prefix("/explain") {
            let report = matcher.explain(text.trim());
            println!("{}", serde_json::to_string_pretty(&report)?);
            continue;
        }

        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| current.get(i).cloned());

        let result = match picked {
            Some(reply) => supervisor.select_quick_reply(&session_id, reply).await,
            None => supervisor.send_text(&session_id, input).await,
        };

        match result {
            Ok(outcome) => current = print_outcome(outcome, current),
            Err(e) => error!(error = %e, "turn failed"),
        }
    }

    supervisor.close_session(&session_id).await?;
    supervisor.shutdown().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;
    telemetry::init(config.log_format)?;

    let matcher = build_matcher(&config).context("failed to load intent catalog")?;
    info!(
        intents = matcher.catalog().len(),
        threshold = config.policy.confidence_threshold,
        short_input_guard = config.policy.short_input_guard,
        "catalog loaded"
    );

    if std::env::args().skip(1).any(|arg| arg == "--preflight") {
        let report = run_preflight(&matcher);
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.ready_to_start {
            std::process::exit(1);
        }
        return Ok(());
    }

    chat(Arc::new(matcher), &config).await
}
