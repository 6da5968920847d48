use std::process::ExitCode;

fn main() -> ExitCode {
    gamedeck_cli::run()
}
