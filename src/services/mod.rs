pub mod leads;
pub mod sync;
