mod app;
mod util;
mod view;
mod voice;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use view::{EngineConfig, FitTimerPolicy, FocusScope};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph payload with `nodes` and `links` arrays.
    #[arg(long, default_value = "data/voice_graph.json")]
    data: PathBuf,

    /// Which links focus view may expand over.
    #[arg(long, value_enum, default_value_t = FocusScope::FullGraph)]
    focus_scope: FocusScope,

    /// How a newer filter/focus change treats a pending camera fit.
    #[arg(long, value_enum, default_value_t = FitTimerPolicy::Debounce)]
    fit_timers: FitTimerPolicy,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "voice_graph=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let engine = EngineConfig {
        focus_scope: args.focus_scope,
        fit_timers: args.fit_timers,
    };
    tracing::info!(data = %args.data.display(), ?engine, "starting voice graph viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "voice-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::VoiceGraphApp::new(
                cc,
                args.data.clone(),
                engine,
            )))
        }),
    )
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let args = Args::parse_from(["voice-graph"]);
        assert_eq!(args.data, PathBuf::from("data/voice_graph.json"));
        assert_eq!(args.focus_scope, FocusScope::FullGraph);
        assert_eq!(args.fit_timers, FitTimerPolicy::Debounce);
    }

    #[test]
    fn cli_accepts_policy_flags() {
        let args = Args::parse_from([
            "voice-graph",
            "--data",
            "other.json",
            "--focus-scope",
            "within-filter",
            "--fit-timers",
            "stack",
        ]);
        assert_eq!(args.focus_scope, FocusScope::WithinFilter);
        assert_eq!(args.fit_timers, FitTimerPolicy::Stack);
    }
}
