//! Library side of the `naf-rules` command: logging setup and the run
//! workflow, kept here so they can be exercised from tests.

pub mod logging;
pub mod run;
