use std::process::ExitCode;

use firstgl_core::DemoKind;

fn main() -> ExitCode {
    firstgl_client::run(DemoKind::Triangle)
}
