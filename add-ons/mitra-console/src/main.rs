//! mitra-console: terminal front end for the Krishi Mitra assistant.
//!
//! Hosts the chat session controller the way the web page does: a display
//! surface, the HTTP QA client against the gateway, a probed speech engine,
//! and the weather/market panels filled once at startup. Questions typed as
//! plain text submit to the open chat; slash commands drive the widget's
//! affordances (open, close, mute, language, stash-and-ask).

mod settings;
mod surface;

use mitra_core::{
    fill_market_prices, fill_weather, ChatConfig, ChatSession, ConversationLog, HttpQaClient,
    SpeechCoordinator,
};
use settings::UserSettings;
use std::sync::Arc;
use surface::{StaticPanel, TermSurface};
use tokio::io::AsyncBufReadExt;
use tracing::warn;

const HELP: &str = "\
कमांड: /open /close /mute /lang <tag> /ask <प्रश्न> /weather /prices /quit\n\
खुली चैट में सादा टेक्स्ट सीधे सवाल के रूप में जाता है।";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = UserSettings::load().unwrap_or_else(|e| {
        warn!("user_config.toml unreadable, using defaults: {e}");
        UserSettings::default()
    });
    let config = ChatConfig::from_env();
    let gateway_url = settings
        .gateway_url
        .clone()
        .unwrap_or_else(|| config.gateway_url.clone());
    let speech_lang = settings.speech_lang.clone().or_else(|| config.speech_lang.clone());

    let mut coordinator = SpeechCoordinator::new(mitra_voice::create_best_engine());
    if settings.start_muted {
        coordinator.toggle_mute();
    }

    let backend = Arc::new(HttpQaClient::with_timeout(
        gateway_url.clone(),
        config.request_timeout,
    ));
    let log = ConversationLog::new(Box::new(TermSurface::new()));
    let session = Arc::new(ChatSession::new(log, coordinator, backend));
    session.set_language(speech_lang).await;

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    fill_weather(&client, &gateway_url, &StaticPanel::new("मौसम")).await;
    fill_market_prices(&client, &gateway_url, &StaticPanel::new("मंडी भाव")).await;

    session.open().await;
    println!("{HELP}");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix('/') {
            let mut parts = rest.splitn(2, ' ');
            let cmd = parts.next().unwrap_or("");
            let arg = parts.next().unwrap_or("").trim().to_string();
            match cmd {
                "quit" | "exit" => break,
                "help" => println!("{HELP}"),
                "open" => session.open().await,
                "close" => session.close().await,
                "mute" => {
                    let muted = session.toggle_mute().await;
                    println!("{}", if muted { "आवाज़ बंद" } else { "आवाज़ चालू" });
                }
                "lang" => {
                    let lang = if arg.is_empty() { None } else { Some(arg) };
                    session.set_language(lang).await;
                }
                "ask" => {
                    // The page's "ask the assistant" button: stash-and-open
                    // when closed, direct submit when open.
                    if !arg.is_empty() {
                        let s = Arc::clone(&session);
                        tokio::spawn(async move { s.ask(&arg).await });
                    }
                }
                "weather" => fill_weather(&client, &gateway_url, &StaticPanel::new("मौसम")).await,
                "prices" => {
                    fill_market_prices(&client, &gateway_url, &StaticPanel::new("मंडी भाव")).await
                }
                _ => println!("अनजान कमांड: /{cmd}"),
            }
        } else if session.is_open().await {
            // Each question runs in its own task; answers may resolve
            // out of order, matched to their entry number.
            let s = Arc::clone(&session);
            tokio::spawn(async move { s.submit(&line).await });
        } else {
            println!("चैट बंद है; /open से खोलें");
        }
    }

    session.close().await;
    Ok(())
}
