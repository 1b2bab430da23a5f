use std::ffi::OsString;

use anyhow::{Context, Result};
use tracing::Level;

use ccflow_core::{ConfigError, Credentials, FlowConfig, SecureString};

/// Environment variable holding the OAuth2 client id.
pub const ENV_CLIENT_ID: &str = "CCFLOW_CLIENT_ID";
/// Environment variable holding the OAuth2 client secret.
pub const ENV_CLIENT_SECRET: &str = "CCFLOW_CLIENT_SECRET";
/// Environment variable holding the token endpoint URL.
pub const ENV_TOKEN_URL: &str = "CCFLOW_TOKEN_URL";
/// Environment variable holding the API endpoint URL.
pub const ENV_API_URL: &str = "CCFLOW_API_URL";
/// Environment variable holding the requested scope.
pub const ENV_SCOPE: &str = "CCFLOW_SCOPE";
/// Environment variable holding the `User-Agent` value.
pub const ENV_USER_AGENT: &str = "CCFLOW_USER_AGENT";

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Obtain an OAuth2 access token with the client credentials grant,
then call one API endpoint with it and print the JSON response.

USAGE:
    ccflow [OPTIONS]

OPTIONS:
    --client-id <ID>          OAuth2 client id          [env: CCFLOW_CLIENT_ID]
    --client-secret <SECRET>  OAuth2 client secret      [env: CCFLOW_CLIENT_SECRET]
    --token-url <URL>         Token endpoint            [env: CCFLOW_TOKEN_URL]
    --api-url <URL>           API endpoint to call      [env: CCFLOW_API_URL]
    --scope <SCOPE>           Requested scope           [env: CCFLOW_SCOPE, default: api_read]
    --user-agent <UA>         User-Agent header value   [env: CCFLOW_USER_AGENT]
    -v, --verbose             Increase log verbosity (repeatable)
    -h, --help                Print this help
";

/// What the command line asks for.
#[derive(Debug)]
pub enum Command {
    /// Print usage and exit.
    Help,
    /// Run the flow.
    Run(AppArgs),
}

/// Settings gathered from flags, falling back to the environment.
#[derive(Debug)]
pub struct AppArgs {
    client_id: Option<String>,
    client_secret: Option<SecureString>,
    token_url: Option<String>,
    api_url: Option<String>,
    scope: Option<String>,
    user_agent: Option<String>,
    verbose: u8,
    /// Arguments that were not recognized.
    pub remaining: Vec<OsString>,
}

impl Command {
    /// Parses the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Fails if a flag is given without a value or a value is not valid UTF-8.
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env(), |name| {
            std::env::var(name).ok()
        })
    }

    /// Parses the given arguments, looking up missing settings with `env`.
    ///
    /// Flags take precedence over environment variables.
    ///
    /// # Errors
    ///
    /// Fails if a flag is given without a value or a value is not valid UTF-8.
    pub fn parse(
        mut pargs: pico_args::Arguments,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(Self::Help);
        }

        let mut setting = |flag: &'static str, var: &str| -> Result<Option<String>> {
            let value = pargs
                .opt_value_from_str::<_, String>(flag)
                .with_context(|| format!("parsing {flag} argument"))?;
            Ok(value.or_else(|| env(var)))
        };

        let client_id = setting("--client-id", ENV_CLIENT_ID)?;
        let client_secret = setting("--client-secret", ENV_CLIENT_SECRET)?.map(SecureString::from);
        let token_url = setting("--token-url", ENV_TOKEN_URL)?;
        let api_url = setting("--api-url", ENV_API_URL)?;
        let scope = setting("--scope", ENV_SCOPE)?;
        let user_agent = setting("--user-agent", ENV_USER_AGENT)?;

        let mut verbose = 0_u8;
        while pargs.contains(["-v", "--verbose"]) {
            verbose = verbose.saturating_add(1);
        }

        Ok(Self::Run(AppArgs {
            client_id,
            client_secret,
            token_url,
            api_url,
            scope,
            user_agent,
            verbose,
            remaining: pargs.finish(),
        }))
    }
}

impl AppArgs {
    /// The maximum log level selected with `-v`.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Validates the settings into a flow configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a missing or malformed setting.
    pub fn to_config(&self) -> Result<FlowConfig, ConfigError> {
        let credentials = Credentials::new(
            self.client_id.clone().unwrap_or_default(),
            self.client_secret
                .clone()
                .unwrap_or_else(|| SecureString::from("")),
            self.token_url.as_deref().unwrap_or_default(),
            self.api_url.as_deref().unwrap_or_default(),
        )?;

        let mut builder = FlowConfig::builder(credentials);
        if let Some(scope) = &self.scope {
            builder = builder.with_scope(scope);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.with_user_agent(user_agent);
        }
        builder.build()
    }
}
