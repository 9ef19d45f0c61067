use clap::Parser;
use code_counter_cli::args::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    code_counter_cli::logging::init(args.verbose);

    let stdout = std::io::stdout();
    match code_counter_cli::run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
