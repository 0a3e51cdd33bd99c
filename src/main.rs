use hetero_wls::config::AnalysisConfig;
use hetero_wls::pipeline::run_analysis;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_analysis(&AnalysisConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "analysis failed");
            eprintln!("Erro: {err}");
            ExitCode::FAILURE
        }
    }
}
