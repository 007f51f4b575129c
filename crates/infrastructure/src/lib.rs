pub mod dns;
pub mod filter_file;
