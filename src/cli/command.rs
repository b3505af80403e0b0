use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Locate the case header row and check it against the write layout",
        long_about = "Read the cases tab once, report where the header row was found and whether bulk overwrites would start on the row directly below it."
    )]
    Inspect,
}
