use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "wildtrails-ops", version, about = "Wild Trails live sighting and SOS console")]
pub struct CliArgs {
    /// Poll once, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the bearer token file
    #[arg(long = "token-file", value_name = "PATH")]
    pub token_file: Option<String>,

    /// Override the poll interval in seconds
    #[arg(long = "poll-secs", value_name = "SECS")]
    pub poll_secs: Option<u64>,
}

impl CliArgs {
    /// Environment changes implied by the flags. `None` unsets the variable;
    /// an explicit token file takes over from `WILDTRAILS_TOKEN`.
    fn env_overrides(&self) -> Vec<(&'static str, Option<String>)> {
        let mut overrides = Vec::new();
        if let Some(url) = &self.api_url {
            overrides.push(("WILDTRAILS_API_URL", Some(url.clone())));
        }
        if let Some(path) = &self.token_file {
            overrides.push(("WILDTRAILS_TOKEN_FILE", Some(path.clone())));
            overrides.push(("WILDTRAILS_TOKEN", None));
        }
        if let Some(secs) = self.poll_secs {
            overrides.push(("WILDTRAILS_POLL_SECS", Some(secs.to_string())));
        }
        overrides
    }

    pub fn apply_env_overrides(&self) {
        for (var, value) in self.env_overrides() {
            match value {
                Some(value) => std::env::set_var(var, value),
                None => std::env::remove_var(var),
            }
        }
    }
}
