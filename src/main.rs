use std::process::ExitCode;

fn main() -> ExitCode {
    oligoadjust_lib::run()
}
