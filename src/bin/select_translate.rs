use clap::{Arg, Command};
use select_translate::{
    Coordinator, HttpBackends, MemorySettings, MockBackends, MockMode, MockTranslator,
    SenderContext, SettingsStore, TranslateRequest, translation_engine,
};
use select_translate::{GEMINI_API_KEY_KEY, TRANSLATION_ENGINE_KEY};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warn".parse().unwrap()),
        )
        .init();

    let matches = Command::new("select-translate")
        .version("0.1.0")
        .about("Translate a piece of text the way the selection overlay would")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .short('e')
                .help("Translation engine: google or gemini (default: google)")
                .default_value("google"),
        )
        .arg(
            Arg::new("gemini-key")
                .long("gemini-key")
                .short('k')
                .help("Gemini API key (required when --engine gemini)"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock backend instead of the network")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("show-log")
                .long("show-log")
                .help("Print the coordinator's recent monitor entries afterwards")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches.get_one::<String>("text").unwrap();
    let use_mock = matches.get_flag("mock");
    let show_log = matches.get_flag("show-log");

    // The CLI stands in for the settings UI: it writes the same two keys the
    // coordinator reads.
    let settings = Arc::new(MemorySettings::new());
    settings
        .set(
            TRANSLATION_ENGINE_KEY,
            matches.get_one::<String>("engine").unwrap().clone(),
        )
        .await;
    if let Some(key) = matches.get_one::<String>("gemini-key") {
        settings.set(GEMINI_API_KEY_KEY, key.clone()).await;
    }

    let mut coordinator = if use_mock {
        Coordinator::new(
            Arc::clone(&settings) as Arc<dyn SettingsStore>,
            Arc::new(MockBackends::new(MockTranslator::new(MockMode::Suffix))),
        )
    } else {
        Coordinator::new(
            Arc::clone(&settings) as Arc<dyn SettingsStore>,
            Arc::new(HttpBackends::new()?),
        )
    };

    let engine = translation_engine(settings.as_ref()).await;
    let response = coordinator
        .handle(
            TranslateRequest {
                text: text.clone(),
                engine,
            },
            SenderContext::Background,
        )
        .await;

    let outcome = match response.translation() {
        Some(translation) => {
            println!("{}", translation);
            Ok(())
        }
        None => {
            let error = response.error().unwrap_or("Translation failed").to_string();
            eprintln!("❌ {}", error);
            Err(error.into())
        }
    };

    if show_log {
        eprintln!();
        eprintln!("Recent monitor entries:");
        for entry in coordinator.monitor().recent_logs(10) {
            eprintln!("  [{}] {}", entry.category, entry.payload);
        }
    }

    outcome
}
