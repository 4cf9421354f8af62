use anyhow::Result;
use clap::Parser;
use vault_policy::constants;

fn main() -> Result<()> {
    vault_policy::util::logging::init();

    let cli = match vault_policy::cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // help/version go to stdout and are not failures
            let code = if err.use_stderr() {
                constants::EXIT_FAILURE
            } else {
                constants::EXIT_SUCCESS
            };
            err.print()?;
            std::process::exit(code);
        }
    };

    std::process::exit(cli.run());
}
