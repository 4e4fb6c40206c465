use {
    anyhow::Context,
    clap::Parser,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to. The first account the node
    /// manages is used to deploy the contract.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Directory containing the compiled Hardhat artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Repository root under which `deployments/` and `shared/contracts/`
    /// are written.
    #[clap(long, env, default_value = ".")]
    pub output_dir: PathBuf,

    /// Name of the contract to deploy. Either a bare contract name or a fully
    /// qualified `path/to/Source.sol:Contract` name.
    #[clap(long, env, default_value = "EliteHealthSystem")]
    pub contract_name: String,

    /// How long to wait (in seconds) for the deployment transaction to be
    /// mined before giving up.
    #[clap(
        long,
        env,
        default_value = "120",
        value_parser = duration_from_seconds,
    )]
    pub confirmation_timeout: Duration,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,deploy_contracts=info,ethrpc=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log events as JSON.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub log_json: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        let config = observe::Config::default()
            .with_env_filter(&self.log_filter)
            .with_stderr_threshold(self.log_stderr_threshold);
        if self.log_json {
            config.with_json_format()
        } else {
            config
        }
    }
}

/// Parses a positive number of seconds. A zero timeout would give up on the
/// transaction right after submitting it.
pub fn duration_from_seconds(s: &str) -> anyhow::Result<Duration> {
    let seconds: f64 = s.parse().context("not a number")?;
    let duration = Duration::try_from_secs_f64(seconds).context("not a valid duration")?;
    anyhow::ensure!(!duration.is_zero(), "must be greater than zero");
    Ok(duration)
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            artifacts_dir,
            output_dir,
            contract_name,
            confirmation_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "output_dir: {}", output_dir.display())?;
        writeln!(f, "contract_name: {contract_name}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            log_json,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "log_json: {log_json}")?;
        Ok(())
    }
}
