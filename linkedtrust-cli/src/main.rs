use clap::Parser;

use linkedtrust::identity::{
    resolver::IdentityResolver,
    session::FileSessionStore,
};
use linkedtrust::logger::configure_logger;
use linkedtrust_config::parse_config;

mod cli;
use cli::{Opts, SubCommand};

fn main() -> Result<(), anyhow::Error> {
    let opts: Opts = Opts::parse();

    match opts.subcmd {
        SubCommand::Canonicalize(cmd) => cmd.execute()?,
        SubCommand::PrepareSigning(cmd) => cmd.execute()?,
        SubCommand::GenerateEthereumAddress(cmd) => cmd.execute()?,
        SubCommand::VerifyClaim(cmd) => cmd.execute()?,
        subcmd => {
            // Other commands require session state
            let config = parse_config()?;
            configure_logger(config.log_level);
            log::info!("config loaded from {}", config.config_path);

            let session_store = FileSessionStore::new(&config.session_path());
            let mut resolver = IdentityResolver::new(session_store);

            match subcmd {
                SubCommand::SignClaim(cmd) => cmd.execute(&resolver)?,
                SubCommand::ShowIdentity(cmd) => cmd.execute(&resolver)?,
                SubCommand::SetDid(cmd) => cmd.execute(&mut resolver)?,
                SubCommand::ClearDid(cmd) => cmd.execute(&mut resolver)?,
                SubCommand::SetAddress(cmd) => cmd.execute(&mut resolver)?,
                SubCommand::ClearAddress(cmd) => cmd.execute(&mut resolver)?,
                SubCommand::UseRawAddress(cmd) => cmd.execute(&mut resolver)?,
                _ => unreachable!(),
            };
        },
    };
    Ok(())
}
