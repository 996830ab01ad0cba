use tips_report::config::AnalysisConfig;
use tips_report::pipeline;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    pipeline::run(&AnalysisConfig::default())?;
    Ok(())
}
