use std::path::Path;

use booking_core::PriceTable;
use transfer_booking::{
    cli::{self, quote, CliError},
    init,
};

const USAGE: &str = "usage: transfer_booking_cli [book | serve [--addr host:port] | quote <file.json> | version | help]";

fn main() {
    init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = dispatch(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(args: &[String]) -> Result<(), CliError> {
    let Some((command, rest)) = args.split_first() else {
        return cli::run_cli();
    };
    match command.as_str() {
        "book" => cli::run_book(),
        "serve" => {
            let addr = match rest {
                [] => None,
                [flag, addr] if flag == "--addr" => Some(addr.as_str()),
                _ => return Err(CliError::Input(USAGE.into())),
            };
            cli::run_serve(addr)
        }
        "quote" => {
            let path = rest.first().ok_or_else(|| CliError::Input(USAGE.into()))?;
            let pricing = booking_config::ConfigManager::from_env()?
                .load()
                .map(|config| config.pricing)
                .unwrap_or_else(|_| PriceTable::default());
            quote::quote_file(Path::new(path), &pricing)?;
            Ok(())
        }
        "version" | "--version" | "-V" => {
            let meta = transfer_booking::utils::build_info::current();
            println!("transfer_booking_cli {} ({})", meta.version, meta.git_hash);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(CliError::Input(format!("unknown command `{other}`\n{USAGE}"))),
    }
}
