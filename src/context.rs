use std::path::PathBuf;

use crate::configuration::{Configuration, SheetLayout};

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let cfg = Configuration {
            api_listen: cli.api_listen,
            credentials: cli.credentials.clone(),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            layout: SheetLayout::default(),
        };
        Self { config: cfg }
    }
}

impl std::ops::Deref for Context {
    type Target = Configuration;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
