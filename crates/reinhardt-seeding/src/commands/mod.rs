//! Django-like `dumpdata` and `loaddata` commands.

mod dumpdata;
mod loaddata;

pub use dumpdata::{DumpDataArgs, DumpDataCommand, DumpDataOptions, DumpResult};
pub use loaddata::{LoadDataArgs, LoadDataCommand, LoadDataOptions};
