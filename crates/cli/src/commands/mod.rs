pub mod fanout;
pub mod fingerprint;
pub mod keys;
