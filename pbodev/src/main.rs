mod application;

mod presentation {
    pub mod cli;
}

use pbo_core::error::Result;

fn main() -> Result<()> {
    application::run()
}
