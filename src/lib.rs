pub mod certificates;
pub mod columns;
pub mod constants;
pub mod domain;
pub mod error;
pub mod identity;
pub mod importer;
pub mod logging;
pub mod normalize;
pub mod storage;
