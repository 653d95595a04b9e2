use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(version, about = "Exports expvar JSON endpoints as Prometheus metrics", long_about = None)]
pub struct Cli {
    /// Configuration file
    ///
    /// YAML file with the listen address and the sources to collect.
    #[arg(short, long, env = "EXPVAR_EXPORTER_CONFIG", value_hint = ValueHint::FilePath, default_value = "expvar-exporter.yaml")]
    pub config: String,
}
