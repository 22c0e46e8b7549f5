use crate::github::GitHubConfig;
use crate::server::ServerConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "github-prs-server")]
#[command(about = "GitHub PRs Server - Renders a user's pull requests as an HTML page")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 1323)]
    pub port: u16,

    /// Glob of template files loaded at startup
    #[arg(long, env = "TEMPLATES_GLOB", default_value = "templates/*.html")]
    pub templates: String,

    /// GitHub login whose pull requests are listed
    #[arg(long, env = "GITHUB_AUTHOR", default_value = "Glitchyi")]
    pub author: String,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Timeout for the outbound search request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            templates_glob: self.templates,
            github: GitHubConfig {
                api_base_url: self.api_url,
                author: self.author,
                timeout: Duration::from_secs(self.timeout_secs),
            },
        }
    }
}
