use anyhow::Result;
use lwcp::cli::run;

fn main() -> Result<()> {
    run()
}
