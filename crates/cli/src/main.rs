use std::process::ExitCode;

fn main() -> ExitCode {
    fabquote_cli::run()
}
