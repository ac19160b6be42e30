//! `serve`: validate configuration, then run the HTTP server unless this is
//! a dry run.

use crate::config::Settings;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }
        Server::new(self.config).run().await
    }

    /// Checks everything `Server::run` checks before touching the network.
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        self.config.jwt.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Weather feed: {}", self.config.weather.url);
        if self.config.database.auto_migrate {
            println!("✓ Pending migrations would be applied on startup");
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
