use std::process::ExitCode;

fn main() -> ExitCode {
    inherit_diff::cli::run()
}
